//! Notification Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::message::NotificationBrief;
use shared::models::{NotificationScope, NotificationView};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub role: NotificationScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Notification {
    pub fn view(&self) -> NotificationView {
        NotificationView {
            id: serde_helpers::id_string(&self.id),
            message: self.message.clone(),
            timestamp: self.timestamp,
            is_read: self.is_read,
            role: self.role,
            user_id: self.user_id.clone(),
        }
    }

    /// Summary pushed together with order events
    pub fn brief(&self) -> NotificationBrief {
        NotificationBrief {
            id: serde_helpers::id_string(&self.id),
            message: self.message.clone(),
            timestamp: self.timestamp,
            is_read: self.is_read,
            role: self.role.as_str().to_string(),
            user_id: self.user_id.clone(),
        }
    }
}
