//! Owner Endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    services::dto::{OwnerDto, OwnerRequest},
    types::ApiResponse,
    AppState,
};

/// GET /api/owners
pub async fn list_owners(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<OwnerDto>>>), ApiError> {
    let owners = state.owners.list().await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(owners))))
}

/// GET /api/owners/:id
pub async fn get_owner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<OwnerDto>>), ApiError> {
    tracing::info!(owner_id = %id, "Fetching owner");

    let owner = state.owners.get(&id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(owner))))
}

/// POST /api/owners
pub async fn create_owner(
    State(state): State<AppState>,
    body: Result<Json<OwnerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<OwnerDto>>), ApiError> {
    let Json(req) = body?;
    tracing::info!("Creating owner");

    let owner = state.owners.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(owner, "Owner created successfully")),
    ))
}

/// PUT /api/owners/:id
pub async fn update_owner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<OwnerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<OwnerDto>>), ApiError> {
    let Json(req) = body?;
    tracing::info!(owner_id = %id, "Updating owner");

    let owner = state.owners.update(&id, req).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(owner, "Owner updated successfully")),
    ))
}
