//! Property Service
//!
//! 매물 조회/생성/수정/삭제 오케스트레이션.
//!
//! # Soft Delete
//!
//! ```text
//!            delete(id)
//!  enabled ─────────────► disabled
//!     │                      │
//!     │ get/list/update      │ get/update/delete → 404
//!     ▼                      ▼
//!   visible               hidden (행은 남아 있음)
//! ```
//!
//! 비활성화된 행은 저장소에 남아 있지만 호출자 입장에서는 존재하지 않는 것과 같음.
//! 되살리는 API는 없음.

use std::sync::Arc;

use crate::db::models::now;
use crate::db::{
    ImageRepository, OwnerRepository, Property, PropertyImage, PropertyRepository,
    PropertyTrace, TraceRepository,
};
use crate::error::ApiError;
use crate::query::{PageRequest, PagedResult, PropertyFilter};
use crate::types::ObjectId;

use super::aggregator::Aggregator;
use super::dto::{
    AddImageRequest, AddTraceRequest, CreatePropertyRequest, PropertyDetailDto, PropertyDto,
    PropertyImageDto, PropertyTraceDto, UpdatePropertyRequest,
};

/// 가격은 소수점 둘째 자리까지 저장
const PRICE_SCALE: u32 = 2;

pub struct PropertyService {
    properties: Arc<dyn PropertyRepository>,
    owners: Arc<dyn OwnerRepository>,
    images: Arc<dyn ImageRepository>,
    traces: Arc<dyn TraceRepository>,
    aggregator: Aggregator,
}

impl PropertyService {
    pub fn new(
        properties: Arc<dyn PropertyRepository>,
        owners: Arc<dyn OwnerRepository>,
        images: Arc<dyn ImageRepository>,
        traces: Arc<dyn TraceRepository>,
    ) -> Self {
        let aggregator = Aggregator::new(owners.clone(), images.clone(), traces.clone());
        Self {
            properties,
            owners,
            images,
            traces,
            aggregator,
        }
    }

    /// 필터 + 페이지네이션 목록 조회
    ///
    /// count 쿼리와 페이지 쿼리는 서로 의존성이 없으므로 동시에 실행
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> Result<PagedResult<PropertyDto>, ApiError> {
        let predicates = filter.predicates();

        let (total, rows) = tokio::try_join!(
            self.properties.count(&predicates),
            self.properties.find_page(&predicates, page),
        )?;

        let aggregates = self.aggregator.enrich(rows).await?;
        let items = aggregates.into_iter().map(PropertyDto::from).collect();

        Ok(PagedResult::new(items, total, page))
    }

    /// 상세 조회 (owner, 이미지, 매매 이력 포함)
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<PropertyDetailDto, ApiError> {
        let property = self.find_active(id).await?;
        let detail = self.aggregator.enrich_detail(property).await?;
        Ok(detail.into())
    }

    /// 매물 생성
    ///
    /// owner 존재 확인은 쓰기 전에 수행: 실패하면 아무것도 저장되지 않음
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, req: CreatePropertyRequest) -> Result<PropertyDto, ApiError> {
        req.validate()?;
        let owner_id = self.ensure_owner(&req.owner_id).await?;

        let timestamp = now();
        let property = Property {
            id: ObjectId::generate().into_string(),
            name: req.name.trim().to_string(),
            address: req.address.trim().to_string(),
            price: req.price.round_dp(PRICE_SCALE),
            code_internal: req.code_internal.trim().to_string(),
            year: req.year,
            owner_id,
            enabled: true,
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.properties.insert(&property).await?;
        tracing::info!(property_id = %property.id, "Property created");

        let aggregate = self.aggregator.enrich_one(property).await?;
        Ok(aggregate.into())
    }

    /// 매물 수정 (전체 필드 교체, last-writer-wins)
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: &str,
        req: UpdatePropertyRequest,
    ) -> Result<PropertyDto, ApiError> {
        req.validate()?;
        let existing = self.find_active(id).await?;
        let owner_id = self.ensure_owner(&req.owner_id).await?;

        let property = Property {
            id: existing.id,
            name: req.name.trim().to_string(),
            address: req.address.trim().to_string(),
            price: req.price.round_dp(PRICE_SCALE),
            code_internal: req.code_internal.trim().to_string(),
            year: req.year,
            owner_id,
            enabled: req.enabled,
            created_at: existing.created_at,
            updated_at: now(),
        };

        if !self.properties.replace(&property).await? {
            return Err(ApiError::NotFound("Property"));
        }
        tracing::info!(property_id = %property.id, "Property updated");

        let aggregate = self.aggregator.enrich_one(property).await?;
        Ok(aggregate.into())
    }

    /// Soft delete. 이미 비활성화된 매물과 존재하지 않는 매물은 구분하지 않음
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ApiError> {
        let property = self.find_active(id).await?;

        if !self.properties.disable(&property.id, now()).await? {
            return Err(ApiError::NotFound("Property"));
        }
        tracing::info!(property_id = %property.id, "Property disabled");

        Ok(true)
    }

    /// 이미지 추가 (활성 매물에만)
    #[tracing::instrument(skip(self))]
    pub async fn add_image(
        &self,
        property_id: &str,
        req: AddImageRequest,
    ) -> Result<PropertyImageDto, ApiError> {
        req.validate()?;
        let property = self.find_active(property_id).await?;

        let image = PropertyImage {
            id: ObjectId::generate().into_string(),
            property_id: property.id,
            file: req.file.trim().to_string(),
            enabled: true,
            created_at: now(),
        };
        self.images.insert(&image).await?;

        Ok(image.into())
    }

    /// 이미지 비활성화
    #[tracing::instrument(skip(self))]
    pub async fn remove_image(&self, id: &str) -> Result<bool, ApiError> {
        let id = ObjectId::parse(id).ok_or(ApiError::NotFound("Image"))?;

        if !self.images.disable(id.as_str()).await? {
            return Err(ApiError::NotFound("Image"));
        }
        Ok(true)
    }

    /// 매매 이력 추가 (append-only)
    #[tracing::instrument(skip(self))]
    pub async fn add_trace(
        &self,
        property_id: &str,
        req: AddTraceRequest,
    ) -> Result<PropertyTraceDto, ApiError> {
        req.validate()?;
        let property = self.find_active(property_id).await?;

        let date_sale = req.date_sale.ok_or_else(|| {
            ApiError::validation("Invalid request data", vec!["DateSale is required".into()])
        })?;

        let trace = PropertyTrace {
            id: ObjectId::generate().into_string(),
            property_id: property.id,
            date_sale,
            name: req.name.trim().to_string(),
            value: req.value.round_dp(PRICE_SCALE),
            tax: req.tax.round_dp(PRICE_SCALE),
            created_at: now(),
        };
        self.traces.insert(&trace).await?;

        Ok(trace.into())
    }

    /// 매매 이력 삭제 (물리 삭제)
    #[tracing::instrument(skip(self))]
    pub async fn remove_trace(&self, id: &str) -> Result<bool, ApiError> {
        let id = ObjectId::parse(id).ok_or(ApiError::NotFound("Trace"))?;

        if !self.traces.delete(id.as_str()).await? {
            return Err(ApiError::NotFound("Trace"));
        }
        Ok(true)
    }

    /// 활성 매물 조회. id 형식 오류, 없음, 비활성화 모두 404
    async fn find_active(&self, id: &str) -> Result<Property, ApiError> {
        let id = ObjectId::parse(id).ok_or(ApiError::NotFound("Property"))?;

        self.properties
            .find_by_id(id.as_str())
            .await?
            .filter(|p| p.enabled)
            .ok_or(ApiError::NotFound("Property"))
    }

    /// owner 존재 확인. 정규화된 id 반환
    async fn ensure_owner(&self, owner_id: &str) -> Result<String, ApiError> {
        let id = ObjectId::parse(owner_id)
            .ok_or_else(|| ApiError::Referential("Owner not found".to_string()))?;

        if !self.owners.exists(id.as_str()).await? {
            return Err(ApiError::Referential("Owner not found".to_string()));
        }
        Ok(id.into_string())
    }
}
