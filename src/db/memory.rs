//! 테스트용 in-memory 저장소
//!
//! 네 개의 repository trait을 모두 구현. 정렬 규칙은 PostgreSQL 구현과 동일.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::{Owner, Property, PropertyImage, PropertyTrace};
use super::repository::{
    ImageRepository, OwnerRepository, PropertyRepository, StoreHealth, TraceRepository,
};
use crate::query::filter::matches_all;
use crate::query::{PageRequest, Predicate};

#[derive(Default)]
pub struct MemoryStore {
    properties: RwLock<Vec<Property>>,
    owners: RwLock<Vec<Owner>>,
    images: RwLock<Vec<PropertyImage>>,
    traces: RwLock<Vec<PropertyTrace>>,

    /// true면 모든 호출이 실패 (장애 시나리오)
    failing: AtomicBool,
    /// owner 조회 호출 횟수 (batch 조회 확인용)
    owner_queries: AtomicUsize,
    /// 모든 호출 앞에 추가되는 지연 (ms)
    latency_ms: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn owner_queries(&self) -> usize {
        self.owner_queries.load(Ordering::SeqCst)
    }

    pub fn property_count(&self) -> usize {
        self.properties.read().unwrap().len()
    }

    async fn check(&self) -> Result<()> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn health_check(&self) -> Result<()> {
        self.check().await
    }
}

#[async_trait]
impl PropertyRepository for MemoryStore {
    async fn count(&self, predicates: &[Predicate]) -> Result<u64> {
        self.check().await?;
        let properties = self.properties.read().unwrap();
        Ok(properties.iter().filter(|p| matches_all(predicates, p)).count() as u64)
    }

    async fn find_page(
        &self,
        predicates: &[Predicate],
        page: PageRequest,
    ) -> Result<Vec<Property>> {
        self.check().await?;
        let properties = self.properties.read().unwrap();

        let mut matching: Vec<Property> = properties
            .iter()
            .filter(|p| matches_all(predicates, p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Property>> {
        self.check().await?;
        let properties = self.properties.read().unwrap();
        Ok(properties.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, property: &Property) -> Result<()> {
        self.check().await?;
        self.properties.write().unwrap().push(property.clone());
        Ok(())
    }

    async fn replace(&self, property: &Property) -> Result<bool> {
        self.check().await?;
        let mut properties = self.properties.write().unwrap();
        match properties.iter_mut().find(|p| p.id == property.id) {
            Some(existing) => {
                *existing = property.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn disable(&self, id: &str, at: DateTime<Utc>) -> Result<bool> {
        self.check().await?;
        let mut properties = self.properties.write().unwrap();
        match properties.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                existing.enabled = false;
                existing.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl OwnerRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Owner>> {
        self.check().await?;
        let mut owners = self.owners.read().unwrap().clone();
        owners.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(owners)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Owner>> {
        self.check().await?;
        self.owner_queries.fetch_add(1, Ordering::SeqCst);
        let owners = self.owners.read().unwrap();
        Ok(owners.iter().find(|o| o.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Owner>> {
        self.check().await?;
        self.owner_queries.fetch_add(1, Ordering::SeqCst);
        let owners = self.owners.read().unwrap();
        Ok(owners.iter().filter(|o| ids.contains(&o.id)).cloned().collect())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        self.check().await?;
        let owners = self.owners.read().unwrap();
        Ok(owners.iter().any(|o| o.id == id))
    }

    async fn insert(&self, owner: &Owner) -> Result<()> {
        self.check().await?;
        self.owners.write().unwrap().push(owner.clone());
        Ok(())
    }

    async fn replace(&self, owner: &Owner) -> Result<bool> {
        self.check().await?;
        let mut owners = self.owners.write().unwrap();
        match owners.iter_mut().find(|o| o.id == owner.id) {
            Some(existing) => {
                *existing = owner.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ImageRepository for MemoryStore {
    async fn find_enabled_by_property_ids(
        &self,
        property_ids: &[String],
    ) -> Result<Vec<PropertyImage>> {
        self.check().await?;
        let images = self.images.read().unwrap();

        let mut found: Vec<PropertyImage> = images
            .iter()
            .filter(|img| img.enabled && property_ids.contains(&img.property_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn insert(&self, image: &PropertyImage) -> Result<()> {
        self.check().await?;
        self.images.write().unwrap().push(image.clone());
        Ok(())
    }

    async fn disable(&self, id: &str) -> Result<bool> {
        self.check().await?;
        let mut images = self.images.write().unwrap();
        match images.iter_mut().find(|img| img.id == id && img.enabled) {
            Some(image) => {
                image.enabled = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TraceRepository for MemoryStore {
    async fn find_by_property_id(&self, property_id: &str) -> Result<Vec<PropertyTrace>> {
        self.check().await?;
        let traces = self.traces.read().unwrap();

        let mut found: Vec<PropertyTrace> = traces
            .iter()
            .filter(|t| t.property_id == property_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date_sale.cmp(&a.date_sale));
        Ok(found)
    }

    async fn insert(&self, trace: &PropertyTrace) -> Result<()> {
        self.check().await?;
        self.traces.write().unwrap().push(trace.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.check().await?;
        let mut traces = self.traces.write().unwrap();
        let before = traces.len();
        traces.retain(|t| t.id != id);
        Ok(traces.len() < before)
    }
}
