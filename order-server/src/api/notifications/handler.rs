//! Notification API Handlers

use axum::Json;
use axum::extract::State;
use shared::models::{NotificationScope, NotificationView};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};

/// GET /api/notifications - 最近 50 条
pub async fn list(
    State(state): State<ServerState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<NotificationView>>>> {
    let notifications: Vec<NotificationView> = state
        .notifications
        .list_recent(NotificationScope::All)
        .await?
        .iter()
        .map(|n| n.view())
        .collect();
    Ok(Json(ApiResponse::success(notifications)))
}

/// POST /api/notifications/mark-read
pub async fn mark_read(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    state.notifications.mark_all_read(NotificationScope::All).await?;
    tracing::info!(user_id = %current_user.id, "Notifications marked as read");
    Ok(Json(ApiResponse::message("All notifications marked as read")))
}

/// DELETE /api/notifications/clear
pub async fn clear(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    state.notifications.clear_all(NotificationScope::All).await?;
    tracing::info!(user_id = %current_user.id, "Notifications cleared");
    Ok(Json(ApiResponse::message("All notifications cleared")))
}
