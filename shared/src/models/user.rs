//! User Model

use super::status::Role;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User response (without password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "All fields are required"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
    /// Checked against [`Role`] by the handler so the message can name it
    pub role: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token + user returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Change-password payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Identity echoed back by the verify-token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Creator summary embedded in order listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_validation() {
        let ok = SignupRequest {
            username: "asha".into(),
            email: "asha@example.com".into(),
            password: "Secret@123".into(),
            role: "Sales".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = SignupRequest {
            email: "not-an-email".into(),
            ..ok.clone()
        };
        assert!(bad.validate().is_err());

        let missing = SignupRequest {
            username: String::new(),
            ..ok
        };
        assert!(missing.validate().is_err());
    }
}
