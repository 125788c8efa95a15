//! # Data Transfer Objects
//!
//! HTTP 요청/응답 데이터 구조를 정의합니다.
//!
//! - **요청 DTO**: `serde` 역직렬화 + `validator` 검증
//! - **응답 DTO**: 엔티티에서 `From` 변환, ObjectId는 16진수 문자열로 노출
//!
//! ```text
//! dto/
//! ├── common/     ← ListParams, SearchParams, PaginatedResponse
//! ├── products/   ← CreateProductRequest, UpdateProductRequest, ProductResponse
//! └── employees/  ← CreateEmployeeRequest, UpdateEmployeeRequest, EmployeeResponse
//! ```

pub mod common;
pub mod products;
pub mod employees;

pub use common::*;
