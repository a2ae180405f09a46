//! Repository Pattern Implementation
//!
//! 레코드 타입별 데이터 접근 인터페이스.
//!
//! - PostgreSQL 구현: `Database` (db/postgres.rs)
//! - 테스트용 in-memory 구현: `memory::MemoryStore`
//!
//! Repository는 존재 여부만 다루고, soft-delete된 행을 숨기는 것은
//! 서비스 레이어의 책임 (목록 조회는 `Predicate::Enabled`로 처리).

use async_trait::async_trait;
use anyhow::Result;
use chrono::{DateTime, Utc};

use super::models::{Owner, Property, PropertyImage, PropertyTrace};
use crate::query::{PageRequest, Predicate};

/// 매물 Repository
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// 조건에 맞는 전체 개수
    async fn count(&self, predicates: &[Predicate]) -> Result<u64>;

    /// createdAt 내림차순 페이지 조회
    async fn find_page(&self, predicates: &[Predicate], page: PageRequest)
        -> Result<Vec<Property>>;

    /// id로 조회 (enabled 여부와 무관)
    async fn find_by_id(&self, id: &str) -> Result<Option<Property>>;

    async fn insert(&self, property: &Property) -> Result<()>;

    /// 전체 필드 교체. 대상이 없으면 false
    async fn replace(&self, property: &Property) -> Result<bool>;

    /// enabled = false, updatedAt 갱신. 대상이 없으면 false
    async fn disable(&self, id: &str, at: DateTime<Utc>) -> Result<bool>;
}

/// 소유자 Repository
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// 이름 오름차순
    async fn list(&self) -> Result<Vec<Owner>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Owner>>;

    /// 여러 id 일괄 조회 (없는 id는 결과에서 빠짐)
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Owner>>;

    async fn exists(&self, id: &str) -> Result<bool>;

    async fn insert(&self, owner: &Owner) -> Result<()>;

    async fn replace(&self, owner: &Owner) -> Result<bool>;
}

/// 이미지 Repository
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// 여러 매물의 enabled 이미지, createdAt 오름차순
    async fn find_enabled_by_property_ids(&self, property_ids: &[String])
        -> Result<Vec<PropertyImage>>;

    async fn insert(&self, image: &PropertyImage) -> Result<()>;

    /// soft-delete. enabled 이미지가 없으면 false
    async fn disable(&self, id: &str) -> Result<bool>;
}

/// 매매 이력 Repository
#[async_trait]
pub trait TraceRepository: Send + Sync {
    /// dateSale 내림차순
    async fn find_by_property_id(&self, property_id: &str) -> Result<Vec<PropertyTrace>>;

    async fn insert(&self, trace: &PropertyTrace) -> Result<()>;

    /// 물리 삭제. 대상이 없으면 false
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// 저장소 상태 확인 (health check)
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn health_check(&self) -> Result<()>;
}
