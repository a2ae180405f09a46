//! Aggregator
//!
//! 저장소가 join을 지원하지 않으므로 매물 행에 owner/이미지/이력을 붙이는 작업을
//! 애플리케이션에서 수행함.
//!
//! # Batch 조회
//!
//! ```text
//! page: [p1(o1), p2(o2), p3(o1)]
//!   │
//!   ├── owners.find_by_ids([o1, o2])              ─┐ 동시 실행
//!   └── images.find_enabled_by_property_ids([p1..p3]) ─┘
//!   │
//!   ▼  메모리에서 join
//! [p1+o1+imgs, p2+o2+imgs, p3+o1+imgs]
//! ```
//!
//! 행마다 owner/이미지를 따로 조회하는 것과 결과가 동일하고 왕복 횟수는 페이지당 2회.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::db::{
    ImageRepository, Owner, OwnerRepository, Property, PropertyImage, PropertyTrace,
    TraceRepository,
};

/// owner와 enabled 이미지가 붙은 매물
#[derive(Debug, Clone)]
pub struct PropertyAggregate {
    pub property: Property,
    pub owner: Option<Owner>,
    /// createdAt 오름차순
    pub images: Vec<PropertyImage>,
}

impl PropertyAggregate {
    /// 대표 이미지: 가장 먼저 등록된 enabled 이미지
    pub fn main_image(&self) -> Option<&PropertyImage> {
        self.images
            .iter()
            .filter(|img| img.enabled)
            .min_by_key(|img| img.created_at)
    }
}

/// 상세 조회용 (매매 이력 포함)
#[derive(Debug, Clone)]
pub struct PropertyDetail {
    pub aggregate: PropertyAggregate,
    /// dateSale 내림차순
    pub traces: Vec<PropertyTrace>,
}

pub struct Aggregator {
    owners: Arc<dyn OwnerRepository>,
    images: Arc<dyn ImageRepository>,
    traces: Arc<dyn TraceRepository>,
}

impl Aggregator {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        images: Arc<dyn ImageRepository>,
        traces: Arc<dyn TraceRepository>,
    ) -> Self {
        Self {
            owners,
            images,
            traces,
        }
    }

    /// 페이지의 모든 매물에 owner와 이미지 연결 (입력 순서 유지)
    pub async fn enrich(&self, properties: Vec<Property>) -> Result<Vec<PropertyAggregate>> {
        if properties.is_empty() {
            return Ok(Vec::new());
        }

        // ownerId가 비어 있으면 owner 없음 (에러 아님)
        let owner_ids: Vec<String> = properties
            .iter()
            .filter(|p| !p.owner_id.is_empty())
            .map(|p| p.owner_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let property_ids: Vec<String> = properties.iter().map(|p| p.id.clone()).collect();

        let (owners, images) = tokio::try_join!(
            self.owners.find_by_ids(&owner_ids),
            self.images.find_enabled_by_property_ids(&property_ids),
        )?;

        let owners: HashMap<String, Owner> =
            owners.into_iter().map(|o| (o.id.clone(), o)).collect();

        let mut images_by_property: HashMap<String, Vec<PropertyImage>> = HashMap::new();
        for image in images.into_iter().filter(|img| img.enabled) {
            images_by_property
                .entry(image.property_id.clone())
                .or_default()
                .push(image);
        }

        Ok(properties
            .into_iter()
            .map(|property| {
                let owner = owners.get(&property.owner_id).cloned();
                let mut images = images_by_property.remove(&property.id).unwrap_or_default();
                images.sort_by_key(|img| img.created_at);

                PropertyAggregate {
                    property,
                    owner,
                    images,
                }
            })
            .collect())
    }

    pub async fn enrich_one(&self, property: Property) -> Result<PropertyAggregate> {
        self.enrich(vec![property])
            .await?
            .pop()
            .ok_or_else(|| anyhow!("aggregation returned no rows"))
    }

    /// 상세 조회: owner, 이미지, 매매 이력
    pub async fn enrich_detail(&self, property: Property) -> Result<PropertyDetail> {
        let property_id = property.id.clone();

        let (aggregate, mut traces) = tokio::try_join!(
            self.enrich_one(property),
            self.traces.find_by_property_id(&property_id),
        )?;
        traces.sort_by(|a, b| b.date_sale.cmp(&a.date_sale));

        Ok(PropertyDetail { aggregate, traces })
    }
}
