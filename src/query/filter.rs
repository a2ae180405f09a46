//! Filter Builder
//!
//! 사용자 필터를 독립적인 predicate 조각의 목록으로 변환.
//! 각 조각은 대응하는 입력이 있을 때만 추가되고, 전체는 AND로 결합됨.
//!
//! ```text
//! PropertyFilter { name: "villa", price_min: 100000, .. }
//!        │
//!        ▼
//! [Enabled(true), NameContains("villa"), MinPrice(100000)]
//!        │                              │
//!        ▼                              ▼
//!  WHERE enabled = $1 AND ...     Predicate::matches (in-memory)
//! ```

use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};

use crate::db::Property;
use crate::types::ObjectId;

/// 목록 조회 필터 (모든 필드 optional)
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub name: Option<String>,
    pub address: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub owner_id: Option<String>,
    pub year: Option<i32>,
    /// 지정하지 않으면 true
    pub enabled: Option<bool>,
}

/// 단일 조건
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Enabled(bool),
    NameContains(String),
    AddressContains(String),
    MinPrice(Decimal),
    MaxPrice(Decimal),
    Owner(String),
    Year(i32),
}

impl PropertyFilter {
    /// 조건 목록 생성. 공백뿐인 문자열은 지정하지 않은 것으로 취급
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = vec![Predicate::Enabled(self.enabled.unwrap_or(true))];

        if let Some(name) = non_blank(&self.name) {
            predicates.push(Predicate::NameContains(name.to_string()));
        }
        if let Some(address) = non_blank(&self.address) {
            predicates.push(Predicate::AddressContains(address.to_string()));
        }
        if let Some(min) = self.price_min {
            predicates.push(Predicate::MinPrice(min));
        }
        if let Some(max) = self.price_max {
            predicates.push(Predicate::MaxPrice(max));
        }
        if let Some(owner_id) = non_blank(&self.owner_id) {
            // 형식이 틀린 id는 그대로 두면 어떤 행과도 일치하지 않음
            let owner_id = ObjectId::parse(owner_id)
                .map(ObjectId::into_string)
                .unwrap_or_else(|| owner_id.to_string());
            predicates.push(Predicate::Owner(owner_id));
        }
        if let Some(year) = self.year {
            predicates.push(Predicate::Year(year));
        }

        predicates
    }
}

impl Predicate {
    /// 메모리 상의 행에 대해 평가
    pub fn matches(&self, property: &Property) -> bool {
        match self {
            Predicate::Enabled(enabled) => property.enabled == *enabled,
            Predicate::NameContains(needle) => contains_ignore_case(&property.name, needle),
            Predicate::AddressContains(needle) => {
                contains_ignore_case(&property.address, needle)
            }
            Predicate::MinPrice(min) => property.price >= *min,
            Predicate::MaxPrice(max) => property.price <= *max,
            Predicate::Owner(owner_id) => property.owner_id == *owner_id,
            Predicate::Year(year) => property.year == *year,
        }
    }

    /// SQL 조건 추가 (값은 항상 bind parameter로 전달)
    fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Predicate::Enabled(enabled) => {
                qb.push("enabled = ").push_bind(*enabled);
            }
            Predicate::NameContains(needle) => {
                qb.push("name ILIKE ")
                    .push_bind(like_pattern(needle))
                    .push(" ESCAPE '\\'");
            }
            Predicate::AddressContains(needle) => {
                qb.push("address ILIKE ")
                    .push_bind(like_pattern(needle))
                    .push(" ESCAPE '\\'");
            }
            Predicate::MinPrice(min) => {
                qb.push("price >= ").push_bind(*min);
            }
            Predicate::MaxPrice(max) => {
                qb.push("price <= ").push_bind(*max);
            }
            Predicate::Owner(owner_id) => {
                qb.push("owner_id = ").push_bind(owner_id.clone());
            }
            Predicate::Year(year) => {
                qb.push("year = ").push_bind(*year);
            }
        }
    }
}

/// 모든 조건을 만족하는지
pub fn matches_all(predicates: &[Predicate], property: &Property) -> bool {
    predicates.iter().all(|p| p.matches(property))
}

/// `WHERE a AND b AND ...` 추가. 조건이 없으면 아무것도 추가하지 않음
pub fn push_where(qb: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        predicate.push_sql(qb);
    }
}

/// LIKE 와일드카드 escape
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(needle))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
