//! Services Module
//!
//! 비즈니스 로직을 담당하는 서비스 레이어
//!
//! # Services
//! - `PropertyService`: 매물 CRUD, 이미지/매매 이력 관리
//! - `OwnerService`: owner CRUD
//! - `Aggregator`: 매물 행에 owner/이미지/이력 연결
//! - `dto`: 요청/응답 타입 및 검증

pub mod aggregator;
pub mod dto;
mod owner_service;
mod property_service;

pub use aggregator::{Aggregator, PropertyAggregate, PropertyDetail};
pub use owner_service::OwnerService;
pub use property_service::PropertyService;
