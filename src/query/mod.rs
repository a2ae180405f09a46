//! Query Module
//!
//! 목록 조회에 필요한 필터와 페이지네이션

pub mod filter;
pub mod pagination;

pub use filter::{PropertyFilter, Predicate};
pub use pagination::{PageRequest, PagedResult};
