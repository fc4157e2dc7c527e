//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk, in-memory engine for tests.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::ServerError;

/// Tables, unique indexes and lookup indexes
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;

DEFINE TABLE IF NOT EXISTS sales_order SCHEMALESS;
DEFINE INDEX IF NOT EXISTS sales_order_code ON TABLE sales_order FIELDS orderId UNIQUE;
DEFINE INDEX IF NOT EXISTS sales_order_creator ON TABLE sales_order FIELDS createdBy;

DEFINE TABLE IF NOT EXISTS counter SCHEMALESS;

DEFINE TABLE IF NOT EXISTS notification SCHEMALESS;
DEFINE INDEX IF NOT EXISTS notification_scope ON TABLE notification FIELDS role;
"#;

/// Database service, owns the SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB store at `path`
    pub async fn open(path: &Path, namespace: &str, database: &str) -> Result<Self, ServerError> {
        let db = Surreal::new::<RocksDb>(path.to_string_lossy().into_owned()).await?;
        tracing::info!(path = %path.display(), "Database opened (SurrealDB/RocksDB)");
        Self::prepare(db, namespace, database).await
    }

    /// Fresh in-memory store
    pub async fn memory(namespace: &str, database: &str) -> Result<Self, ServerError> {
        let db = Surreal::new::<Mem>(()).await?;
        Self::prepare(db, namespace, database).await
    }

    async fn prepare(db: Surreal<Db>, namespace: &str, database: &str) -> Result<Self, ServerError> {
        db.use_ns(namespace).use_db(database).await?;
        db.query(SCHEMA).await?.check()?;
        tracing::info!(namespace, database, "Database schema applied");
        Ok(Self { db })
    }
}

/// Cheap liveness check
pub async fn ping(db: &Surreal<Db>) -> bool {
    db.query("RETURN 1").await.is_ok()
}
