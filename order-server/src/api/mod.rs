//! API 路由模块
//!
//! - [`health`] - 健康检查 (公共)
//! - [`auth`] - 注册、登录、改密、令牌校验
//! - [`orders`] - 订单 CRUD、批量导入导出、部门工作清单
//! - [`notifications`] - 通知列表、全部已读、清空

pub mod auth;
pub mod health;
pub mod notifications;
pub mod orders;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppError, AppResult};

use axum::Json;
use axum::extract::rejection::JsonRejection;

/// 解包 JSON 请求体；格式错误统一转为 400 校验错误
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        AppError::validation(rejection.body_text())
    })
}
