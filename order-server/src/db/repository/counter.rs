//! Counter Repository
//!
//! Named monotonic sequences; one row per counter in `counter`.

use super::{BaseRepository, RepoError, RepoResult};
use serde::Deserialize;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Counter backing human readable order codes
pub const ORDER_COUNTER: &str = "orderId";

const MAX_ATTEMPTS: u32 = 8;

#[derive(Debug, Deserialize)]
struct CounterRow {
    seq: u64,
}

#[derive(Clone)]
pub struct CounterRepository {
    base: BaseRepository,
}

impl CounterRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Atomically advance `name` by `n` and return the first reserved value.
    ///
    /// The block `first..first + n` belongs to the caller. Concurrent callers
    /// never receive overlapping blocks. The increment is a single statement;
    /// when the engine rejects its commit with a transaction conflict the
    /// same statement is submitted again.
    pub async fn reserve(&self, name: &str, n: u64) -> RepoResult<u64> {
        if n == 0 {
            return Err(RepoError::Validation("Cannot reserve zero values".to_string()));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_reserve(name, n).await {
                Ok(last) => return Ok(last - n + 1),
                Err(RepoError::Database(msg)) if is_retryable(&msg) && attempt < MAX_ATTEMPTS => {
                    tracing::debug!(counter = name, attempt, "Counter conflict, retrying");
                    tokio::time::sleep(Duration::from_millis(5 * u64::from(attempt))).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Current value without advancing; 0 when the counter was never used
    pub async fn current(&self, name: &str) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT seq FROM type::thing('counter', $name)")
            .bind(("name", name.to_string()))
            .await?;
        let rows: Vec<CounterRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.seq).unwrap_or(0))
    }

    async fn try_reserve(&self, name: &str, n: u64) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("UPSERT type::thing('counter', $name) SET seq = (seq OR 0) + $n RETURN AFTER")
            .bind(("name", name.to_string()))
            .bind(("n", n))
            .await?;
        let row: Option<CounterRow> = result.take(0)?;
        row.map(|r| r.seq)
            .ok_or_else(|| RepoError::Database(format!("Counter '{}' did not advance", name)))
    }
}

fn is_retryable(message: &str) -> bool {
    message.contains("can be retried") || message.contains("conflict")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_messages() {
        assert!(is_retryable(
            "Failed to commit transaction due to a read or write conflict. This transaction can be retried"
        ));
        assert!(!is_retryable("Parse error"));
    }

    #[tokio::test]
    async fn blocks_never_overlap() {
        let db = crate::db::DbService::memory("test", "counter").await.unwrap().db;
        let counters = CounterRepository::new(db);

        assert_eq!(counters.current(ORDER_COUNTER).await.unwrap(), 0);
        assert_eq!(counters.reserve(ORDER_COUNTER, 1).await.unwrap(), 1);
        assert_eq!(counters.reserve(ORDER_COUNTER, 3).await.unwrap(), 2);
        assert_eq!(counters.reserve(ORDER_COUNTER, 1).await.unwrap(), 5);
        assert_eq!(counters.current(ORDER_COUNTER).await.unwrap(), 5);
        assert!(counters.reserve(ORDER_COUNTER, 0).await.is_err());
    }

    #[tokio::test]
    async fn reserve_is_unique_under_concurrency() {
        let db = crate::db::DbService::memory("test", "counter").await.unwrap().db;
        let counters = CounterRepository::new(db);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let counters = counters.clone();
                tokio::spawn(async move { counters.reserve(ORDER_COUNTER, 2).await })
            })
            .collect();

        let mut firsts = Vec::new();
        for task in tasks {
            firsts.push(task.await.unwrap().unwrap());
        }
        firsts.sort_unstable();
        let expected: Vec<u64> = (0..8).map(|i| 1 + 2 * i).collect();
        assert_eq!(firsts, expected);
        assert_eq!(counters.current(ORDER_COUNTER).await.unwrap(), 16);
    }
}
