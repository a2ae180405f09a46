//! Owner Service
//!
//! owner 목록/조회/생성/수정. 물리 삭제는 제공하지 않음 (매물이 고아가 됨).

use std::sync::Arc;

use crate::db::models::now;
use crate::db::{Owner, OwnerRepository};
use crate::error::ApiError;
use crate::types::ObjectId;

use super::dto::{OwnerDto, OwnerRequest};

pub struct OwnerService {
    owners: Arc<dyn OwnerRepository>,
}

impl OwnerService {
    pub fn new(owners: Arc<dyn OwnerRepository>) -> Self {
        Self { owners }
    }

    /// 이름 오름차순
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<OwnerDto>, ApiError> {
        let owners = self.owners.list().await?;
        Ok(owners.into_iter().map(OwnerDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<OwnerDto, ApiError> {
        self.find(id).await.map(OwnerDto::from)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, req: OwnerRequest) -> Result<OwnerDto, ApiError> {
        req.validate()?;
        let birthday = req.birthday.ok_or_else(|| {
            ApiError::validation("Invalid request data", vec!["Birthday is required".into()])
        })?;

        let timestamp = now();
        let owner = Owner {
            id: ObjectId::generate().into_string(),
            name: req.name.trim().to_string(),
            address: req.address.trim().to_string(),
            photo: req.photo.trim().to_string(),
            birthday,
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.owners.insert(&owner).await?;
        tracing::info!(owner_id = %owner.id, "Owner created");

        Ok(owner.into())
    }

    /// 전체 필드 교체
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: &str, req: OwnerRequest) -> Result<OwnerDto, ApiError> {
        req.validate()?;
        let existing = self.find(id).await?;
        let birthday = req.birthday.ok_or_else(|| {
            ApiError::validation("Invalid request data", vec!["Birthday is required".into()])
        })?;

        let owner = Owner {
            id: existing.id,
            name: req.name.trim().to_string(),
            address: req.address.trim().to_string(),
            photo: req.photo.trim().to_string(),
            birthday,
            created_at: existing.created_at,
            updated_at: now(),
        };

        if !self.owners.replace(&owner).await? {
            return Err(ApiError::NotFound("Owner"));
        }
        tracing::info!(owner_id = %owner.id, "Owner updated");

        Ok(owner.into())
    }

    async fn find(&self, id: &str) -> Result<Owner, ApiError> {
        let id = ObjectId::parse(id).ok_or(ApiError::NotFound("Owner"))?;

        self.owners
            .find_by_id(id.as_str())
            .await?
            .ok_or(ApiError::NotFound("Owner"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::db::memory::MemoryStore;

    fn service() -> (Arc<MemoryStore>, OwnerService) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), OwnerService::new(store))
    }

    fn request(name: &str) -> OwnerRequest {
        OwnerRequest {
            name: name.into(),
            address: "123 Main St, New York, NY".into(),
            photo: "https://example.com/photo.jpg".into(),
            birthday: Some(Utc::now() - Duration::days(365 * 30)),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_, service) = service();

        let created = service.create(request("  Maria Garcia ")).await.unwrap();
        assert_eq!(created.name, "Maria Garcia");
        assert!(ObjectId::is_valid(&created.id));

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.photo, "https://example.com/photo.jpg");
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let (_, service) = service();
        for name in ["Zoe", "Adam", "Maria"] {
            service.create(request(name)).await.unwrap();
        }

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["Adam", "Maria", "Zoe"]);
    }

    #[tokio::test]
    async fn test_get_unknown_or_malformed_is_not_found() {
        let (_, service) = service();
        assert!(matches!(
            service.get("65a1b2c3d4e5f60718293a4b").await,
            Err(ApiError::NotFound("Owner"))
        ));
        assert!(matches!(service.get("bogus").await, Err(ApiError::NotFound("Owner"))));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let (_, service) = service();
        let created = service.create(request("John Smith")).await.unwrap();

        let mut req = request("John A. Smith");
        req.photo = String::new();
        let updated = service.update(&created.id, req).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "John A. Smith");
        assert!(updated.photo.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_, service) = service();
        let result = service
            .update("65a1b2c3d4e5f60718293a4b", request("Nobody"))
            .await;
        assert!(matches!(result, Err(ApiError::NotFound("Owner"))));
    }

    #[tokio::test]
    async fn test_update_invalid_body_on_missing_owner_is_validation_error() {
        let (_, service) = service();
        let result = service
            .update("65a1b2c3d4e5f60718293a4b", OwnerRequest::default())
            .await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_invalid_request_persists_nothing() {
        let (store, service) = service();
        let mut req = request("");
        req.birthday = None;

        let err = service.create(req).await.unwrap_err();
        match err {
            ApiError::Validation { errors, .. } => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(OwnerRepository::list(store.as_ref()).await.unwrap().is_empty());
    }
}
