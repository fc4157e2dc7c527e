//! Order API Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use shared::models::{OrderCreate, OrderPatch};

use crate::api::json_body;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderView};
use crate::orders::Projection;
use crate::orders::export;
use crate::spreadsheet::{self, XLSX_CONTENT_TYPE};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// GET /api/orders
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<OrderView>>>> {
    let orders = state.orders.list_for(&current_user).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// GET /api/orders/{view}
pub async fn projection(
    State(state): State<ServerState>,
    view: Projection,
) -> AppResult<Json<ApiResponse<Vec<OrderView>>>> {
    let orders = state.orders.projection(view).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    payload: Result<Json<OrderCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let input = json_body(payload)?;
    let order = state.orders.create(input, &current_user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message("Order created successfully", order)),
    ))
}

/// PUT /api/orders/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<OrderPatch>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let patch = json_body(payload)?;
    let order = state.orders.edit(&id, patch, &current_user).await?;
    Ok(Json(ApiResponse::success_with_message("Order updated successfully", order)))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.orders.delete(&id, &current_user).await?;
    Ok(Json(ApiResponse::message("Order deleted successfully")))
}

#[derive(Debug, Serialize)]
pub struct BulkImportResult {
    pub inserted: usize,
    pub orders: Vec<Order>,
}

/// POST /api/orders/bulk
///
/// The first file part of the form is the workbook
pub async fn bulk_import(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<BulkImportResult>>)> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.file_name().is_none() {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        upload = Some((name, bytes));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if bytes.is_empty() {
        return Err(AppError::new(ErrorCode::NoFileProvided));
    }
    if bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::new(ErrorCode::FileTooLarge));
    }
    tracing::info!(file = %file_name, size = bytes.len(), "Bulk import upload received");

    let rows = spreadsheet::read_rows(bytes.to_vec())?;
    let orders = state.orders.bulk_import(&rows, &current_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            format!("Successfully imported {} orders", orders.len()),
            BulkImportResult {
                inserted: orders.len(),
                orders,
            },
        )),
    ))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::FileTooLarge)
    } else {
        AppError::invalid_request(err.body_text())
    }
}

/// GET /api/orders/export
pub async fn export(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Response> {
    let table = state.orders.export(&current_user).await?;
    let rows = table.rows.len();
    let bytes = spreadsheet::write_table(export::SHEET_NAME, &table)?;

    let file_name = export::file_name(Utc::now().date_naive());
    let disposition = HeaderValue::from_str(&format!("attachment; filename={file_name}"))
        .map_err(|e| AppError::internal(format!("Bad export file name: {e}")))?;
    tracing::info!(user_id = %current_user.id, rows, "Orders exported");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
