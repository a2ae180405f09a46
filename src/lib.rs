//! Real Estate Listings API Library
//!
//! # Overview
//!
//! 매물(property), 소유자(owner), 매물 이미지, 매매 이력(trace)을 관리하는 REST API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                         API                              │
//! │                                                          │
//! │  ┌─────────┐  ┌──────────┐  ┌─────────┐  ┌─────────┐    │
//! │  │ Routes  │─▶│ Services │─▶│  Query  │  │  Types  │    │
//! │  └─────────┘  └────┬─────┘  └────┬────┘  └─────────┘    │
//! │                    │             │                       │
//! │                    ▼             ▼                       │
//! │               ┌──────────────────────┐                   │
//! │               │   DB (repositories)  │                   │
//! │               └──────────┬───────────┘                   │
//! └──────────────────────────┼───────────────────────────────┘
//!                            │
//!                            ▼
//!                   ┌────────────────┐
//!                   │   PostgreSQL   │
//!                   └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 처리
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `services`: 비즈니스 로직 (PropertyService, OwnerService, Aggregator)
//! - `query`: 필터 빌더, 페이지네이션
//! - `db`: 데이터베이스 연동
//! - `types`: 공통 타입 정의
//!
//! ## Usage
//!
//! ```rust,ignore
//! use real_estate_api::{config::Config, db::Database, routes, AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url, config.database_max_connections).await?;
//!     let app = routes::create_router(AppState::new(Arc::new(db), config));
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod routes;
pub mod services;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::ApiError;
pub use services::{OwnerService, PropertyService};

use db::{ImageRepository, OwnerRepository, PropertyRepository, StoreHealth, TraceRepository};

/// 애플리케이션 전역 상태
#[derive(Clone)]
pub struct AppState {
    pub properties: Arc<PropertyService>,
    pub owners: Arc<OwnerService>,
    pub health: Arc<dyn StoreHealth>,
    pub config: Arc<Config>,
}

impl AppState {
    /// 하나의 저장소 구현으로 모든 서비스 구성
    pub fn new<S>(store: Arc<S>, config: Config) -> Self
    where
        S: PropertyRepository
            + OwnerRepository
            + ImageRepository
            + TraceRepository
            + StoreHealth
            + 'static,
    {
        let properties = PropertyService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        );
        let owners = OwnerService::new(store.clone());

        Self {
            properties: Arc::new(properties),
            owners: Arc::new(owners),
            health: store,
            config: Arc::new(config),
        }
    }
}
