//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - 서버 상태 확인
//!
//! GET    /api/properties                - 매물 목록 (필터 + 페이지네이션)
//! POST   /api/properties                - 매물 생성
//! GET    /api/properties/:id            - 매물 상세 (owner, 이미지, 매매 이력)
//! PUT    /api/properties/:id            - 매물 수정
//! DELETE /api/properties/:id            - 매물 soft delete
//! POST   /api/properties/:id/images     - 이미지 추가
//! POST   /api/properties/:id/traces     - 매매 이력 추가
//! DELETE /api/images/:id                - 이미지 삭제
//! DELETE /api/traces/:id                - 매매 이력 삭제
//!
//! GET    /api/owners                    - owner 목록
//! POST   /api/owners                    - owner 생성
//! GET    /api/owners/:id                - owner 조회
//! PUT    /api/owners/:id                - owner 수정
//! ```
//!
//! # Middleware
//!
//! ```text
//! request ─▶ CORS ─▶ Trace ─▶ CatchPanic ─▶ Timeout ─▶ handler
//! ```
//!
//! 어느 단계에서 실패하든 응답은 항상 `ApiResponse` envelope.

pub mod health;
pub mod image;
pub mod owner;
pub mod property;
pub mod trace;

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{handle_middleware_error, handle_panic, ApiError},
    AppState,
};

/// 라우터 생성
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let request_timeout = state.config.request_timeout;

    Router::new()
        // Health check
        .route("/health", get(health::health_check))

        // Properties
        .route(
            "/api/properties",
            get(property::list_properties).post(property::create_property),
        )
        .route(
            "/api/properties/:id",
            get(property::get_property)
                .put(property::update_property)
                .delete(property::delete_property),
        )
        .route("/api/properties/:id/images", post(image::add_image))
        .route("/api/properties/:id/traces", post(trace::add_trace))
        .route("/api/images/:id", delete(image::remove_image))
        .route("/api/traces/:id", delete(trace::remove_trace))

        // Owners
        .route("/api/owners", get(owner::list_owners).post(owner::create_owner))
        .route(
            "/api/owners/:id",
            get(owner::get_owner).put(owner::update_owner),
        )

        .fallback(fallback)

        // 미들웨어 (아래에 있을수록 바깥쪽)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // 상태 주입
        .with_state(state)
}

/// 등록되지 않은 경로
async fn fallback() -> ApiError {
    ApiError::NotFound("Resource")
}

/// CORS 설정
///
/// 프로덕션에서는 ALLOWED_ORIGINS 목록만, 개발 환경에서는 로컬 프론트엔드 허용
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if config.is_production() {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
