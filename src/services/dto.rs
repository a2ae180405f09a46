//! Transport DTOs
//!
//! 요청 본문, 응답 본문, 그리고 엔티티 → DTO 매핑.
//! JSON 필드명은 camelCase, 금액은 JSON number로 직렬화.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregator::{PropertyAggregate, PropertyDetail};
use crate::db::{Owner, PropertyImage, PropertyTrace};
use crate::error::ApiError;
use crate::types::ObjectId;

// ============ Response Types ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    pub id: String,
    pub name: String,
    pub address: String,
    pub photo: String,
    pub birthday: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImageDto {
    pub id: String,
    pub file: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTraceDto {
    pub id: String,
    pub date_sale: DateTime<Utc>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

/// 목록/생성/수정 응답
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
    pub owner_id: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub owner: Option<OwnerDto>,

    /// 대표 이미지 (가장 먼저 등록된 enabled 이미지)
    pub image_url: Option<String>,

    pub images: Vec<PropertyImageDto>,
}

/// 상세 조회 응답 (매매 이력 포함)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetailDto {
    #[serde(flatten)]
    pub property: PropertyDto,
    pub traces: Vec<PropertyTraceDto>,
}

impl From<Owner> for OwnerDto {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            name: owner.name,
            address: owner.address,
            photo: owner.photo,
            birthday: owner.birthday,
        }
    }
}

impl From<PropertyImage> for PropertyImageDto {
    fn from(image: PropertyImage) -> Self {
        Self {
            id: image.id,
            file: image.file,
            enabled: image.enabled,
        }
    }
}

impl From<PropertyTrace> for PropertyTraceDto {
    fn from(trace: PropertyTrace) -> Self {
        Self {
            id: trace.id,
            date_sale: trace.date_sale,
            name: trace.name,
            value: trace.value,
            tax: trace.tax,
        }
    }
}

impl From<PropertyAggregate> for PropertyDto {
    fn from(aggregate: PropertyAggregate) -> Self {
        let image_url = aggregate.main_image().map(|img| img.file.clone());
        let PropertyAggregate {
            property,
            owner,
            images,
        } = aggregate;

        Self {
            id: property.id,
            name: property.name,
            address: property.address,
            price: property.price,
            code_internal: property.code_internal,
            year: property.year,
            owner_id: property.owner_id,
            enabled: property.enabled,
            created_at: property.created_at,
            updated_at: property.updated_at,
            owner: owner.map(OwnerDto::from),
            image_url,
            images: images.into_iter().map(PropertyImageDto::from).collect(),
        }
    }
}

impl From<PropertyDetail> for PropertyDetailDto {
    fn from(detail: PropertyDetail) -> Self {
        Self {
            property: detail.aggregate.into(),
            traces: detail.traces.into_iter().map(PropertyTraceDto::from).collect(),
        }
    }
}

// ============ Request Types ============

/// POST /api/properties
///
/// 누락된 필드는 기본값으로 채운 뒤 검증 단계에서 필드별 메시지로 보고됨
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
    pub owner_id: String,
}

/// PUT /api/properties/:id
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePropertyRequest {
    pub name: String,
    pub address: String,
    pub price: Decimal,
    pub code_internal: String,
    pub year: i32,
    pub owner_id: String,
    pub enabled: bool,
}

impl Default for UpdatePropertyRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            price: Decimal::ZERO,
            code_internal: String::new(),
            year: 0,
            owner_id: String::new(),
            enabled: true,
        }
    }
}

/// POST/PUT /api/owners
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerRequest {
    pub name: String,
    pub address: String,
    pub photo: String,
    pub birthday: Option<DateTime<Utc>>,
}

/// POST /api/properties/:id/images
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddImageRequest {
    pub file: String,
}

/// POST /api/properties/:id/traces
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddTraceRequest {
    pub date_sale: Option<DateTime<Utc>>,
    pub name: String,
    pub value: Decimal,
    pub tax: Decimal,
}

// ============ Validation ============

pub const MIN_YEAR: i32 = 1800;
pub const MAX_YEAR: i32 = 2100;

/// NUMERIC(18,2): 정수부 16자리
const AMOUNT_INTEGER_DIGITS: u32 = 16;

/// 금액 상한 (exclusive), 10^16
pub fn max_amount() -> Decimal {
    Decimal::from(10_i64.pow(AMOUNT_INTEGER_DIGITS))
}

/// 필드별 에러 수집기
#[derive(Default)]
struct Validator {
    errors: Vec<String>,
}

impl Validator {
    fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len < min || value.chars().count() > max {
            self.errors
                .push(format!("{} must be between {} and {} characters", field, min, max));
        }
        self
    }

    fn max_length(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors
                .push(format!("{} must be at most {} characters", field, max));
        }
        self
    }

    /// 금액: 0 이상, NUMERIC(18,2) 컬럼에 들어가는 범위 (소수점 둘째 자리 반올림 후)
    fn amount(&mut self, field: &str, value: Decimal) -> &mut Self {
        if value < Decimal::ZERO {
            self.errors
                .push(format!("{} must be greater than or equal to 0", field));
        } else if value.round_dp(2) >= max_amount() {
            self.errors
                .push(format!("{} must be less than {}", field, max_amount()));
        }
        self
    }

    fn year(&mut self, value: i32) -> &mut Self {
        if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
            self.errors.push(format!(
                "Year must be between {} and {}",
                MIN_YEAR, MAX_YEAR
            ));
        }
        self
    }

    fn object_id(&mut self, field: &str, value: &str) -> &mut Self {
        if !ObjectId::is_valid(value) {
            self.errors.push(format!("{} must be a valid ObjectId", field));
        }
        self
    }

    fn required<T>(&mut self, field: &str, value: &Option<T>) -> &mut Self {
        if value.is_none() {
            self.errors.push(format!("{} is required", field));
        }
        self
    }

    fn check(&mut self, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(message.to_string());
        }
        self
    }

    fn finish(&mut self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(
                "Invalid request data",
                std::mem::take(&mut self.errors),
            ))
        }
    }
}

fn validate_property_fields(
    name: &str,
    address: &str,
    price: Decimal,
    code_internal: &str,
    year: i32,
    owner_id: &str,
) -> Result<(), ApiError> {
    Validator::default()
        .length("Name", name, 1, 200)
        .length("Address", address, 1, 500)
        .amount("Price", price)
        .length("CodeInternal", code_internal, 1, 50)
        .year(year)
        .object_id("OwnerId", owner_id)
        .finish()
}

impl CreatePropertyRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_property_fields(
            &self.name,
            &self.address,
            self.price,
            &self.code_internal,
            self.year,
            &self.owner_id,
        )
    }
}

impl UpdatePropertyRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_property_fields(
            &self.name,
            &self.address,
            self.price,
            &self.code_internal,
            self.year,
            &self.owner_id,
        )
    }
}

impl OwnerRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let not_future = self.birthday.map_or(true, |b| b <= Utc::now());
        Validator::default()
            .length("Name", &self.name, 1, 200)
            .length("Address", &self.address, 1, 500)
            .max_length("Photo", &self.photo, 1000)
            .required("Birthday", &self.birthday)
            .check(not_future, "Birthday cannot be in the future")
            .finish()
    }
}

impl AddImageRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::default()
            .length("File", &self.file, 1, 1000)
            .finish()
    }
}

impl AddTraceRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        Validator::default()
            .required("DateSale", &self.date_sale)
            .length("Name", &self.name, 1, 200)
            .amount("Value", self.value)
            .amount("Tax", self.tax)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreatePropertyRequest {
        CreatePropertyRequest {
            name: "Test".into(),
            address: "A".into(),
            price: Decimal::from(100_000),
            code_internal: "C1".into(),
            year: 2023,
            owner_id: "65a1b2c3d4e5f60718293a4b".into(),
        }
    }

    fn errors_of(result: Result<(), ApiError>) -> Vec<String> {
        match result {
            Err(ApiError::Validation { errors, .. }) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_reported_per_field() {
        let req: CreatePropertyRequest = serde_json::from_str("{}").unwrap();
        let errors = errors_of(req.validate());

        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.starts_with("Name")));
        assert!(errors.iter().any(|e| e.starts_with("Year")));
        assert!(errors.contains(&"OwnerId must be a valid ObjectId".to_string()));
    }

    #[test]
    fn test_negative_price_and_bad_year() {
        let req = CreatePropertyRequest {
            price: Decimal::from(-1),
            year: 1799,
            ..valid_create()
        };
        let errors = errors_of(req.validate());
        assert_eq!(
            errors,
            vec![
                "Price must be greater than or equal to 0".to_string(),
                "Year must be between 1800 and 2100".to_string(),
            ]
        );
    }

    #[test]
    fn test_amount_upper_bound_matches_column() {
        let largest = CreatePropertyRequest {
            price: max_amount() - Decimal::new(1, 2),
            ..valid_create()
        };
        assert!(largest.validate().is_ok());

        let too_large = CreatePropertyRequest {
            price: max_amount(),
            ..valid_create()
        };
        assert_eq!(
            errors_of(too_large.validate()),
            vec!["Price must be less than 10000000000000000".to_string()]
        );

        // 반올림하면 상한에 닿는 값
        let rounds_up = CreatePropertyRequest {
            price: max_amount() - Decimal::new(1, 3),
            ..valid_create()
        };
        assert_eq!(errors_of(rounds_up.validate()).len(), 1);

        let trace = AddTraceRequest {
            date_sale: Some(Utc::now()),
            name: "Sale".into(),
            value: Decimal::from(100),
            tax: max_amount(),
        };
        assert_eq!(
            errors_of(trace.validate()),
            vec!["Tax must be less than 10000000000000000".to_string()]
        );
    }

    #[test]
    fn test_whitespace_only_name_rejected() {
        let req = CreatePropertyRequest {
            name: "   ".into(),
            ..valid_create()
        };
        assert_eq!(errors_of(req.validate()).len(), 1);
    }

    #[test]
    fn test_update_request_enabled_defaults_true() {
        let req: UpdatePropertyRequest = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(req.enabled);
    }

    #[test]
    fn test_request_accepts_camel_case_and_numeric_price() {
        let req: CreatePropertyRequest = serde_json::from_str(
            r#"{"name":"Villa","address":"A","price":250000.5,"codeInternal":"V-1","year":2001,"ownerId":"65a1b2c3d4e5f60718293a4b"}"#,
        )
        .unwrap();
        assert_eq!(req.code_internal, "V-1");
        assert_eq!(req.price, Decimal::new(2500005, 1));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_owner_request_requires_birthday() {
        let req = OwnerRequest {
            name: "John Smith".into(),
            address: "123 Main St".into(),
            ..Default::default()
        };
        assert_eq!(errors_of(req.validate()), vec!["Birthday is required".to_string()]);
    }

    #[test]
    fn test_trace_request_validation() {
        let req = AddTraceRequest {
            date_sale: Some(Utc::now()),
            name: "Sale".into(),
            value: Decimal::from(100),
            tax: Decimal::from(-5),
        };
        assert_eq!(
            errors_of(req.validate()),
            vec!["Tax must be greater than or equal to 0".to_string()]
        );
    }

    #[test]
    fn test_detail_dto_flattens_property_fields() {
        let dto = PropertyDetailDto {
            property: PropertyDto {
                id: "p".into(),
                name: "n".into(),
                address: "a".into(),
                price: Decimal::from(100_000),
                code_internal: "c".into(),
                year: 2020,
                owner_id: "o".into(),
                enabled: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
                owner: None,
                image_url: None,
                images: vec![],
            },
            traces: vec![],
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["codeInternal"], "c");
        assert_eq!(json["price"], 100000.0);
        assert!(json["imageUrl"].is_null());
        assert!(json["traces"].as_array().unwrap().is_empty());
    }
}
