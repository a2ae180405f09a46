//! Database Module
//!
//! # Storage Layout
//!
//! 네 개의 테이블 (owners, properties, property_images, property_traces).
//! 테이블 간 FK 제약은 두지 않음: 참조 무결성은 서비스 레이어에서만 검증.
//!
//! # Connection Pool
//!
//! SQLx의 PgPool 사용
//! - 최대 커넥션 수 설정 (DATABASE_MAX_CONNECTIONS)
//! - 커넥션 재사용
//! - acquire 타임아웃 처리

pub mod models;
mod postgres;
mod repository;

#[cfg(test)]
pub mod memory;

pub use models::*;
pub use repository::*;

use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// PostgreSQL 연결 및 쿼리 담당
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 데이터베이스 연결
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 설정값 (기본 10)
    /// - min_connections: 1 (idle 시 최소 유지)
    /// - acquire_timeout: 3초 (커넥션 획득 대기)
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 마이그레이션 실행
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await?;
        Ok(())
    }
}
