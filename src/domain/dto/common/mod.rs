//! 엔티티에 무관한 공통 DTO

pub mod meta;
pub mod pagination;

pub use meta::MetaResponse;
pub use pagination::{ListParams, PaginatedResponse, SearchParams, SortOrder};
