//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 엔티티들을 정의합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! entities/
//! ├── mod.rs          ← 이 파일
//! ├── shared/         ← 공통 엔티티 및 타입
//! │   └── base.rs     ← Entity trait, EntityMeta
//! ├── products/
//! │   └── product.rs  ← Product 엔티티
//! └── employees/
//!     └── employee.rs ← Employee 엔티티
//! ```
//!
//! ## 엔티티 설계 원칙
//!
//! 모든 엔티티는 다음 형태를 따릅니다:
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Product {
//!     #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
//!     pub id: Option<ObjectId>,
//!     // ... 도메인 필드
//!     #[serde(flatten)]
//!     pub meta: EntityMeta, // created_by, updated_by, is_deleted, deleted_by, deleted_at ...
//! }
//! ```
//!
//! 베이스 서비스는 `Entity` trait을 통해서만 엔티티에 접근하므로,
//! 새 엔티티를 추가할 때는 구조체 정의와 `Entity` 구현만 있으면 됩니다.

pub mod shared;
pub mod products;
pub mod employees;

pub use shared::*;
pub use products::Product;
pub use employees::Employee;
