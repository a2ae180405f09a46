//! Property Trace Endpoints
//!
//! 매매 이력은 append-only. 잘못 입력된 이력만 물리 삭제.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    services::dto::{AddTraceRequest, PropertyTraceDto},
    types::ApiResponse,
    AppState,
};

/// POST /api/properties/:id/traces
///
/// ```json
/// { "dateSale": "2024-03-01T00:00:00Z", "name": "Sale", "value": 250000, "tax": 12500 }
/// ```
pub async fn add_trace(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
    body: Result<Json<AddTraceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyTraceDto>>), ApiError> {
    let Json(req) = body?;
    tracing::info!(property_id = %property_id, "Adding property trace");

    let trace = state.properties.add_trace(&property_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(trace, "Trace added successfully")),
    ))
}

/// DELETE /api/traces/:id
pub async fn remove_trace(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<bool>>), ApiError> {
    tracing::info!(trace_id = %id, "Removing property trace");

    let removed = state.properties.remove_trace(&id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(removed, "Trace removed successfully")),
    ))
}
