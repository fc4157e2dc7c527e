//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// - /api/signup, /api/login: public (skipped by require_auth)
/// - /api/change-password, /api/verify-token: authenticated
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/signup", post(handler::signup))
        .route("/api/login", post(handler::login))
        .route("/api/change-password", post(handler::change_password))
        .route("/api/verify-token", get(handler::verify_token))
}
