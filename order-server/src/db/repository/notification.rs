//! Notification Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Notification;
use chrono::Utc;
use shared::models::NotificationScope;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Size of the notification feed returned to clients
pub const RECENT_LIMIT: usize = 50;

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append an unread notification for the given scope
    pub async fn append(
        &self,
        message: String,
        scope: NotificationScope,
        user_id: Option<String>,
    ) -> RepoResult<Notification> {
        let record = Notification {
            id: None,
            message,
            timestamp: Utc::now(),
            is_read: false,
            role: scope,
            user_id,
        };
        let mut result = self
            .base
            .db()
            .query("CREATE notification CONTENT $data RETURN AFTER")
            .bind(("data", record))
            .await?;
        let created: Option<Notification> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    /// Most recent notifications of a scope, newest first
    pub async fn list_recent(&self, scope: NotificationScope) -> RepoResult<Vec<Notification>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM notification WHERE role = $scope ORDER BY timestamp DESC LIMIT $limit")
            .bind(("scope", scope.as_str().to_string()))
            .bind(("limit", RECENT_LIMIT))
            .await?;
        let notifications: Vec<Notification> = result.take(0)?;
        Ok(notifications)
    }

    /// Mark every notification of a scope as read
    pub async fn mark_all_read(&self, scope: NotificationScope) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE notification SET isRead = true WHERE role = $scope AND isRead = false")
            .bind(("scope", scope.as_str().to_string()))
            .await?
            .check()?;
        Ok(())
    }

    /// Delete every notification of a scope
    pub async fn clear_all(&self, scope: NotificationScope) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE notification WHERE role = $scope")
            .bind(("scope", scope.as_str().to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
