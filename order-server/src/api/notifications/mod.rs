//! 通知 API 模块
//!
//! 所有通知都属于 "All" 范围；已读和清空对整个范围生效。

mod handler;

use axum::{Router, routing::delete, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/notifications", get(handler::list))
        .route("/api/notifications/mark-read", post(handler::mark_read))
        .route("/api/notifications/clear", delete(handler::clear))
}
