//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod counter;
pub mod notification;
pub mod order;
pub mod user;

pub use counter::CounterRepository;
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use user::UserRepository;

use shared::error::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            RepoError::Duplicate(message)
        } else {
            RepoError::Database(message)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 客户端只会看到 "sales_order:xxx" / "user:xxx" 字符串；
// 解析时要求表名匹配，避免拿用户 id 去删订单。

/// Parse a "table:id" string and check it belongs to `table`.
/// A bare key is accepted and attached to `table`.
pub fn parse_record_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RepoError::Validation("Empty ID".to_string()));
    }
    if !raw.contains(':') {
        return Ok(RecordId::from_table_key(table, raw));
    }
    let id: RecordId = raw
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", raw)))?;
    if id.table() != table {
        return Err(RepoError::Validation(format!("Invalid ID: {}", raw)));
    }
    Ok(id)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_matching_table() {
        let id = parse_record_id("sales_order", "sales_order:abc").unwrap();
        assert_eq!(id.table(), "sales_order");
    }

    #[test]
    fn bare_key_gets_table() {
        let id = parse_record_id("user", "xyz").unwrap();
        assert_eq!(id.to_string(), "user:xyz");
    }

    #[test]
    fn rejects_foreign_table() {
        assert!(matches!(
            parse_record_id("sales_order", "user:abc"),
            Err(RepoError::Validation(_))
        ));
        assert!(parse_record_id("sales_order", "  ").is_err());
    }

    #[test]
    fn maps_to_app_error() {
        let err: AppError = RepoError::NotFound("Order not found".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        let err: AppError = RepoError::Database("boom".into()).into();
        assert!(err.is_system());
    }
}
