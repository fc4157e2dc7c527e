//! User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{NewUser, User};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id ("user:…" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = parse_record_id(USER_TABLE, id)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Resolve several users at once, used to attach creators to order lists
    pub async fn find_many(&self, ids: &[String]) -> RepoResult<Vec<User>> {
        let things = ids
            .iter()
            .filter_map(|id| parse_record_id(USER_TABLE, id).ok())
            .collect::<Vec<_>>();
        if things.is_empty() {
            return Ok(Vec::new());
        }
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE id IN $ids")
            .bind(("ids", things))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users)
    }

    /// Create a new user; the email must be unused
    pub async fn create(&self, data: NewUser) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate("Email already exists".to_string()));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    username = $username,
                    email = $email,
                    passwordHash = $password_hash,
                    role = $role,
                    createdAt = $now
                RETURN AFTER"#,
            )
            .bind(("username", data.username))
            .bind(("email", data.email))
            .bind(("password_hash", data.password_hash))
            .bind(("role", data.role.as_str().to_string()))
            .bind(("now", Utc::now()))
            .await?;

        let created: Option<User> = result.take(0).map_err(|e| {
            // Unique index catches a concurrent signup with the same email
            let err = RepoError::from(e);
            match err {
                RepoError::Duplicate(_) => RepoError::Duplicate("Email already exists".to_string()),
                other => other,
            }
        })?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Replace the stored hash and stamp the change time
    pub async fn update_password(&self, id: &str, password_hash: String) -> RepoResult<User> {
        let thing = parse_record_id(USER_TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET passwordHash = $hash, lastPasswordChange = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("hash", password_hash))
            .bind(("now", Utc::now()))
            .await?;
        let updated: Option<User> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }
}
