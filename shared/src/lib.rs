//! Shared types for the order backend
//!
//! Wire types used by order-server and its clients: error codes and the
//! response envelope, order/user models, and live event payloads.

pub mod error;
pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
