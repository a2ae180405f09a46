//! Property Endpoints
//!
//! 매물 목록(필터 + 페이지네이션), 상세, 생성, 수정, soft delete.

use std::{fmt::Display, str::FromStr};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use crate::{
    error::ApiError,
    query::{PageRequest, PagedResult, PropertyFilter},
    services::dto::{CreatePropertyRequest, PropertyDetailDto, PropertyDto, UpdatePropertyRequest},
    types::ApiResponse,
    AppState,
};

// ============ Request Types ============

/// GET /api/properties 쿼리 파라미터
///
/// `?name=villa&priceMin=100000&page=2&pageSize=20`
///
/// 값이 비어 있는 파라미터(`?priceMin=&page=`)는 지정하지 않은 것으로 취급
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub price_min: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub price_max: Option<Decimal>,
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<i64>,
}

/// 빈 문자열 → None, 그 외에는 `FromStr`로 파싱
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl PropertyListQuery {
    fn into_parts(self) -> Result<(PropertyFilter, PageRequest), ApiError> {
        let page = PageRequest::new(self.page, self.page_size)?;
        let filter = PropertyFilter {
            name: self.name,
            address: self.address,
            price_min: self.price_min,
            price_max: self.price_max,
            owner_id: self.owner_id,
            year: self.year,
            enabled: self.enabled,
        };
        Ok((filter, page))
    }
}

// ============ Handlers ============

/// GET /api/properties
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Success",
///   "data": {
///     "items": [ { "id": "...", "name": "Sunset Villa", "imageUrl": "...", ... } ],
///     "total": 42, "page": 1, "pageSize": 10, "totalPages": 5,
///     "hasPreviousPage": false, "hasNextPage": true
///   },
///   "errors": []
/// }
/// ```
pub async fn list_properties(
    State(state): State<AppState>,
    query: Result<Query<PropertyListQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ApiResponse<PagedResult<PropertyDto>>>), ApiError> {
    let Query(query) = query?;
    let (filter, page) = query.into_parts()?;

    tracing::info!(page = page.page(), page_size = page.page_size(), "Listing properties");

    let result = state.properties.list(&filter, page).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(result))))
}

/// GET /api/properties/:id
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyDetailDto>>), ApiError> {
    tracing::info!(property_id = %id, "Fetching property");

    let detail = state.properties.get(&id).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(detail))))
}

/// POST /api/properties
///
/// owner가 존재하지 않으면 400 "Owner not found", 아무것도 저장되지 않음
pub async fn create_property(
    State(state): State<AppState>,
    body: Result<Json<CreatePropertyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyDto>>), ApiError> {
    let Json(req) = body?;
    tracing::info!(owner_id = %req.owner_id, "Creating property");

    let created = state.properties.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            created,
            "Property created successfully",
        )),
    ))
}

/// PUT /api/properties/:id
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePropertyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyDto>>), ApiError> {
    let Json(req) = body?;
    tracing::info!(property_id = %id, "Updating property");

    let updated = state.properties.update(&id, req).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(
            updated,
            "Property updated successfully",
        )),
    ))
}

/// DELETE /api/properties/:id
///
/// soft delete (`enabled = false`)
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<bool>>), ApiError> {
    tracing::info!(property_id = %id, "Deleting property");

    let deleted = state.properties.delete(&id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_message(
            deleted,
            "Property deleted successfully",
        )),
    ))
}
