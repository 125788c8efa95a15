//! 상품 DTO 모듈

pub mod request;
pub mod response;

pub use request::{CreateProductRequest, UpdateProductRequest};
pub use response::ProductResponse;
