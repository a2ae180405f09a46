//! Database Models
//!
//! Rows of the four record types. Relations are plain id columns; joins are
//! performed by the aggregator, never by the store.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// 서버 타임스탬프 (Postgres TIMESTAMPTZ 정밀도에 맞춰 microsecond 단위로 절삭)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// 매물
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,

    /// Owner FK (애플리케이션 레벨에서만 검증)
    pub owner_id: String,

    /// soft-delete 플래그. false면 목록/조회에서 제외됨
    pub enabled: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 소유자
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub address: String,
    pub photo: String,
    pub birthday: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 매물 이미지
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PropertyImage {
    pub id: String,
    pub property_id: String,

    /// 이미지 URL 또는 경로
    pub file: String,

    /// 삭제 시 false (soft-delete)
    pub enabled: bool,

    pub created_at: DateTime<Utc>,
}

/// 매매 이력 (append-only)
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PropertyTrace {
    pub id: String,
    pub property_id: String,
    pub date_sale: DateTime<Utc>,
    pub name: String,
    pub value: Decimal,
    pub tax: Decimal,
    pub created_at: DateTime<Utc>,
}
