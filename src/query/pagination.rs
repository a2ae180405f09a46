//! Pagination Engine
//!
//! page는 1부터 시작. total은 항상 별도의 count 쿼리로 계산하고
//! 페이지 메타데이터는 total과 pageSize로부터 유도함.

use serde::Serialize;

use crate::error::ApiError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// 검증된 페이지 요청
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// 범위 검증: `page >= 1`, `1 <= pageSize <= 100`
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Result<Self, ApiError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut errors = Vec::new();
        if page < 1 || page > i64::from(u32::MAX) {
            errors.push("Page must be greater than or equal to 1".to_string());
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            errors.push(format!("PageSize must be between 1 and {}", MAX_PAGE_SIZE));
        }
        if !errors.is_empty() {
            return Err(ApiError::validation("Invalid request parameters", errors));
        }

        Ok(Self {
            page: page as u32,
            page_size: page_size as u32,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// `(page - 1) * pageSize`
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE as u32,
            page_size: DEFAULT_PAGE_SIZE as u32,
        }
    }
}

/// 페이지 결과
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        let total_pages = total.div_ceil(u64::from(request.page_size));
        let page = request.page;

        Self {
            items,
            total,
            page,
            page_size: request.page_size,
            total_pages,
            has_previous_page: page > 1,
            has_next_page: u64::from(page) < total_pages,
        }
    }
}
