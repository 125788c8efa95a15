//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 엔티티 서비스들은 `OnceCell` 기반 싱글톤으로 관리되며,
//! `inventory`를 통해 서비스 레지스트리에 자동 등록됩니다.
//!
//! # Modules
//!
//! - [`base`] - 제네릭 CRUD 베이스 서비스와 라이프사이클 훅
//! - [`products`] - 상품 서비스
//! - [`employees`] - 직원 서비스
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{products::ProductService, base::CrudResource};
//!
//! let products = ProductService::instance();
//! let page = products.crud().find_all(&ListParams::default()).await?;
//! ```

pub mod base;
pub mod products;
pub mod employees;
