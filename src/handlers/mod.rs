//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring Framework의 Controller 레이어와 동일한 역할을 수행하며,
//! ActixWeb 프레임워크를 기반으로 구현되었습니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리      ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - CrudService<T> + 엔티티 훅          ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - DocumentStore<T>               ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! Spring에서는 엔티티마다 `@RestController`를 작성하지만, 여기서는
//! [`CrudResource`](crate::services::base::CrudResource)에 대해 제네릭인
//! 핸들러 하나로 모든 엔티티의 기본 엔드포인트를 처리합니다.
//!
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/products")
//!         .configure(handlers::crud::configure::<ProductService>)
//! );
//! ```
//!
//! ## 모듈 구성
//!
//! - **`crud`**: 제네릭 CRUD 핸들러 (생성, 목록, 검색, 조회, 수정, 삭제, 소프트 삭제, 복구)
//! - **`products`**: SKU/카테고리 조회
//! - **`employees`**: 이메일/부서 조회
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `AppError`의 `ResponseError` 구현이 상태 코드를 결정합니다.

pub mod crud;
pub mod products;
pub mod employees;
