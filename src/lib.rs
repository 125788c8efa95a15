//! CRUD 서비스 백엔드
//!
//! 문서 저장소 위에서 동작하는 제네릭 CRUD 데이터 접근 계층입니다.
//! 베이스 서비스 하나가 생성/조회/수정/삭제/소프트 삭제/복구/검색을 제공하고,
//! 엔티티별 서비스(Product, Employee)는 훅으로 고유 규칙만 추가합니다.
//!
//! # Features
//!
//! - **제네릭 CRUD**: `CrudService<T>` 하나로 모든 엔티티 처리
//! - **캐시 무효화**: 조회 결과 캐시와 변경 시 무효화 (Redis / 메모리)
//! - **감사 로그**: 변경 연산마다 행위자와 변경 내용 기록
//! - **라이프사이클 이벤트**: `{entity}.{action}` 이벤트 발행
//! - **싱글톤 DI**: `OnceCell` + `inventory` 기반 서비스 레지스트리
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← CrudResource 제네릭 핸들러
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌──────────────────────────────┐
//! │ CrudService<T>  │ ───▶ │ Cache · AuditLogger · Events │
//! └─────────────────┘      └──────────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ DocumentStore<T>│ ← MongoDB / 메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use crud_service_backend::services::products::ProductService;
//! use crud_service_backend::services::base::CrudResource;
//!
//! let products = ProductService::instance();
//! let created = products.crud().create(product, Some("user-42")).await?;
//! let page = products.find_by_category("keyboards", &ListParams::default()).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod audit;
pub mod events;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
