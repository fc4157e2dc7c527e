//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{ORDER_TABLE, Order};
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM sales_order ORDER BY sequence DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders created by one user, newest first
    pub async fn find_by_creator(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM sales_order WHERE createdBy = $creator ORDER BY sequence DESC")
            .bind(("creator", user_id.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Find order by record id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_record_id(ORDER_TABLE, id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Persist a fully formed order (code already minted)
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query("CREATE sales_order CONTENT $data RETURN AFTER")
            .bind(("data", order))
            .await?;
        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Insert a batch in a single statement; either every row lands or none
    pub async fn insert_many(&self, orders: Vec<Order>) -> RepoResult<Vec<Order>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let expected = orders.len();
        let mut result = self
            .base
            .db()
            .query("INSERT INTO sales_order $rows")
            .bind(("rows", orders))
            .await?;
        let inserted: Vec<Order> = result.take(0)?;
        if inserted.len() != expected {
            return Err(RepoError::Database(format!(
                "Inserted {} of {} orders",
                inserted.len(),
                expected
            )));
        }
        Ok(inserted)
    }

    /// Merge a partial document into an existing order
    pub async fn merge(&self, id: &str, patch: Value) -> RepoResult<Order> {
        let thing = parse_record_id(ORDER_TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $patch RETURN AFTER")
            .bind(("thing", thing))
            .bind(("patch", patch))
            .await?;
        let updated: Option<Order> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Hard delete, returns the removed document
    pub async fn delete(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_record_id(ORDER_TABLE, id)?;
        let removed: Option<Order> = self.base.db().delete(thing).await?;
        Ok(removed)
    }
}
