//! PostgreSQL repository 구현
//!
//! 목록 쿼리는 `sqlx::QueryBuilder`로 조립하고 나머지는 고정 SQL.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use super::models::{Owner, Property, PropertyImage, PropertyTrace};
use super::repository::{
    ImageRepository, OwnerRepository, PropertyRepository, StoreHealth, TraceRepository,
};
use super::Database;
use crate::query::filter::push_where;
use crate::query::{PageRequest, Predicate};

const PROPERTY_COLUMNS: &str =
    "id, name, address, price, code_internal, year, owner_id, enabled, created_at, updated_at";

const OWNER_COLUMNS: &str = "id, name, address, photo, birthday, created_at, updated_at";

#[async_trait]
impl StoreHealth for Database {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PropertyRepository for Database {
    async fn count(&self, predicates: &[Predicate]) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM properties");
        push_where(&mut qb, predicates);

        let count = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn find_page(
        &self,
        predicates: &[Predicate],
        page: PageRequest,
    ) -> Result<Vec<Property>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM properties",
            PROPERTY_COLUMNS
        ));
        push_where(&mut qb, predicates);

        // 같은 createdAt은 id(생성 시각 prefix 포함)로 정렬해 순서를 고정
        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let properties = qb
            .build_query_as::<Property>()
            .fetch_all(&self.pool)
            .await?;

        Ok(properties)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties WHERE id = $1",
            PROPERTY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    async fn insert(&self, property: &Property) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO properties (
                id, name, address, price, code_internal, year,
                owner_id, enabled, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#
        )
        .bind(&property.id)
        .bind(&property.name)
        .bind(&property.address)
        .bind(property.price)
        .bind(&property.code_internal)
        .bind(property.year)
        .bind(&property.owner_id)
        .bind(property.enabled)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn replace(&self, property: &Property) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE properties SET
                name = $2,
                address = $3,
                price = $4,
                code_internal = $5,
                year = $6,
                owner_id = $7,
                enabled = $8,
                updated_at = $9
            WHERE id = $1
            "#
        )
        .bind(&property.id)
        .bind(&property.name)
        .bind(&property.address)
        .bind(property.price)
        .bind(&property.code_internal)
        .bind(property.year)
        .bind(&property.owner_id)
        .bind(property.enabled)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn disable(&self, id: &str, at: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE properties SET enabled = FALSE, updated_at = $2 WHERE id = $1"
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl OwnerRepository for Database {
    async fn list(&self) -> Result<Vec<Owner>> {
        let owners = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {} FROM owners ORDER BY name ASC",
            OWNER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(owners)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {} FROM owners WHERE id = $1",
            OWNER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Owner>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let owners = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {} FROM owners WHERE id = ANY($1)",
            OWNER_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(owners)
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM owners WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert(&self, owner: &Owner) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO owners (id, name, address, photo, birthday, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#
        )
        .bind(&owner.id)
        .bind(&owner.name)
        .bind(&owner.address)
        .bind(&owner.photo)
        .bind(owner.birthday)
        .bind(owner.created_at)
        .bind(owner.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn replace(&self, owner: &Owner) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE owners SET
                name = $2,
                address = $3,
                photo = $4,
                birthday = $5,
                updated_at = $6
            WHERE id = $1
            "#
        )
        .bind(&owner.id)
        .bind(&owner.name)
        .bind(&owner.address)
        .bind(&owner.photo)
        .bind(owner.birthday)
        .bind(owner.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ImageRepository for Database {
    async fn find_enabled_by_property_ids(
        &self,
        property_ids: &[String],
    ) -> Result<Vec<PropertyImage>> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }

        let images = sqlx::query_as::<_, PropertyImage>(
            r#"
            SELECT id, property_id, file, enabled, created_at
            FROM property_images
            WHERE property_id = ANY($1) AND enabled = TRUE
            ORDER BY created_at ASC, id ASC
            "#
        )
        .bind(property_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn insert(&self, image: &PropertyImage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO property_images (id, property_id, file, enabled, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#
        )
        .bind(&image.id)
        .bind(&image.property_id)
        .bind(&image.file)
        .bind(image.enabled)
        .bind(image.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn disable(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE property_images SET enabled = FALSE WHERE id = $1 AND enabled = TRUE"
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TraceRepository for Database {
    async fn find_by_property_id(&self, property_id: &str) -> Result<Vec<PropertyTrace>> {
        let traces = sqlx::query_as::<_, PropertyTrace>(
            r#"
            SELECT id, property_id, date_sale, name, value, tax, created_at
            FROM property_traces
            WHERE property_id = $1
            ORDER BY date_sale DESC
            "#
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(traces)
    }

    async fn insert(&self, trace: &PropertyTrace) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO property_traces (id, property_id, date_sale, name, value, tax, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#
        )
        .bind(&trace.id)
        .bind(&trace.property_id)
        .bind(trace.date_sale)
        .bind(&trace.name)
        .bind(trace.value)
        .bind(trace.tax)
        .bind(trace.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM property_traces WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
