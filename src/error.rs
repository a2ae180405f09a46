//! Error Handling Module
//!
//! Provides type-safe error handling with proper HTTP status code mapping.
//! Every error is rendered as the standard `ApiResponse` envelope so clients
//! never see a bare failure body.

use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use thiserror::Error;

use crate::types::ApiResponse;

/// API 에러 타입
///
/// # Design Decision
///
/// 각 에러 variant는 적절한 HTTP 상태 코드에 매핑됨
/// - 검증 실패, 참조 무결성 실패: 400
/// - 존재하지 않음 / soft-delete 됨: 404
/// - 저장소/내부 오류: 500 (상세 내용은 로그에만 남김)
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 400 Bad Request ============
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    /// 존재하지 않는 owner 참조 등
    #[error("{0}")]
    Referential(String),

    // ============ 404 Not Found ============
    #[error("{0} not found")]
    NotFound(&'static str),

    // ============ 408 Request Timeout ============
    #[error("Request timed out")]
    Timeout,

    // ============ 500 Internal Server Error ============
    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn validation(message: impl Into<String>, errors: Vec<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            errors,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::Referential(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body: ApiResponse<()> = match self {
            ApiError::Validation { message, errors } => ApiResponse::error(message, errors),
            ApiError::Referential(message) => ApiResponse::error(message, Vec::new()),
            ApiError::NotFound(resource) => {
                ApiResponse::error(format!("{} not found", resource), Vec::new())
            }
            ApiError::Timeout => ApiResponse::error("Request timed out", Vec::new()),

            // 내부 에러는 클라이언트에 상세 정보 노출 안 함
            ApiError::InternalError => {
                ApiResponse::error("An internal server error occurred", Vec::new())
            }
        };

        (status, Json(body)).into_response()
    }
}

/// anyhow 에러를 ApiError로 변환 (repository 레이어)
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Repository error: {:?}", err);
        ApiError::InternalError
    }
}

/// 잘못된 JSON body
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("Invalid request data", vec![rejection.body_text()])
    }
}

/// 잘못된 query string
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation("Invalid request parameters", vec![rejection.body_text()])
    }
}

/// tower 미들웨어(timeout 등) 에러 처리
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        ApiError::InternalError
    }
}

/// 패닉을 500 envelope으로 변환 (catch-all)
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!("Handler panicked: {}", detail);

    ApiError::InternalError.into_response()
}
