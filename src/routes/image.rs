//! Property Image Endpoints
//!
//! 이미지는 파일 URL만 저장. 삭제는 soft delete.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::ApiError,
    services::dto::{AddImageRequest, PropertyImageDto},
    types::ApiResponse,
    AppState,
};

/// POST /api/properties/:id/images
pub async fn add_image(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
    body: Result<Json<AddImageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyImageDto>>), ApiError> {
    let Json(req) = body?;
    tracing::info!(property_id = %property_id, "Adding property image");

    let image = state.properties.add_image(&property_id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(image, "Image added successfully")),
    ))
}

/// DELETE /api/images/:id
pub async fn remove_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<bool>>), ApiError> {
    tracing::info!(image_id = %id, "Removing property image");

    let removed = state.properties.remove_image(&id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(removed, "Image removed successfully")),
    ))
}
