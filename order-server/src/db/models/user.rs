//! User Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{CreatorSummary, Role, UserInfo};
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User model matching the `user` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
    /// argon2 PHC string; never leaves the server
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_password_change: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn id_string(&self) -> String {
        serde_helpers::id_string(&self.id)
    }

    /// Public view without credential material
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    pub fn summary(&self) -> CreatorSummary {
        CreatorSummary {
            id: self.id_string(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Data for a new user row; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}
