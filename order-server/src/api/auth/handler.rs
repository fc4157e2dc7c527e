//! Authentication Handlers
//!
//! Signup, login, password change and token verification

use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use shared::message::{LiveEvent, PasswordChangePayload};
use shared::models::{
    AuthResponse, ChangePasswordRequest, LoginRequest, Role, SignupRequest, VerifiedIdentity,
};
use validator::Validate;

use crate::api::json_body;
use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, meets_policy, verify_password};
use crate::core::ServerState;
use crate::db::models::{NewUser, User};
use crate::db::repository::RepoError;
use crate::live::Broadcaster;
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Fixed delay before answering a login, so unknown email and wrong password
/// take the same time
const AUTH_FIXED_DELAY_MS: u64 = 300;

fn issue_token(state: &ServerState, user: &User) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(&user.id_string(), &user.username, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// POST /api/signup
pub async fn signup(
    State(state): State<ServerState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let req = json_body(payload)?;
    req.validate()?;

    let role: Role = req
        .role
        .parse()
        .map_err(|_| AppError::with_message(ErrorCode::InvalidRole, "Invalid role").with_detail("field", "role"))?;

    let email = req.email.trim().to_lowercase();
    let user = state
        .users
        .create(NewUser {
            username: req.username.trim().to_string(),
            email,
            password_hash: hash(&req.password)?,
            role,
        })
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyExists),
            other => other.into(),
        })?;

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = %user.id_string(), role = %user.role, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "User registered successfully",
            AuthResponse {
                token,
                user: user.info(),
            },
        )),
    ))
}

/// POST /api/login
///
/// Unknown email and wrong password produce the same error
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let req = json_body(payload)?;
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let user = state.users.find_by_email(&email).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(user) => {
            let valid = verify_password(&req.password, &user.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !valid {
                security_log!("WARN", "login_failed", email = email.clone(), reason = "wrong_password");
                return Err(AppError::invalid_credentials());
            }
            user
        }
        None => {
            security_log!("WARN", "login_failed", email = email.clone(), reason = "unknown_email");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = %user.id_string(), role = %user.role, "User logged in");

    Ok(Json(ApiResponse::success_with_message(
        "Login successful",
        AuthResponse {
            token,
            user: user.info(),
        },
    )))
}

/// POST /api/change-password
pub async fn change_password(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let req = json_body(payload)?;
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(AppError::validation("Current and new password are required"));
    }
    if req.current_password == req.new_password {
        return Err(AppError::new(ErrorCode::PasswordUnchanged));
    }
    if !meets_policy(&req.new_password) {
        return Err(AppError::new(ErrorCode::PasswordTooWeak).with_detail("field", "newPassword"));
    }

    let user = state
        .users
        .find_by_id(&current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let valid = verify_password(&req.current_password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        security_log!("WARN", "password_change_rejected", user_id = current_user.id.clone());
        return Err(AppError::new(ErrorCode::CurrentPasswordIncorrect));
    }

    let updated = state
        .users
        .update_password(&current_user.id, hash(&req.new_password)?)
        .await?;
    tracing::info!(user_id = %current_user.id, "Password changed");

    state
        .live
        .publish(LiveEvent::password_changed(&PasswordChangePayload {
            user_id: updated.id_string(),
            email: updated.email.clone(),
            timestamp: updated.last_password_change.unwrap_or_else(Utc::now),
        }))
        .await;

    Ok(Json(ApiResponse::message("Password changed successfully")))
}

/// GET /api/verify-token
pub async fn verify_token(current_user: CurrentUser) -> Json<ApiResponse<VerifiedIdentity>> {
    Json(ApiResponse::success(VerifiedIdentity {
        id: current_user.id,
        email: current_user.email,
        role: current_user.role,
    }))
}
