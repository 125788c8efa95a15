//! # 베이스 서비스
//!
//! 엔티티 서비스들이 공유하는 제네릭 CRUD 구현입니다.
//!
//! - [`crud_service`] - `CrudService<T>`: 저장소 호출, 캐시, 이벤트, 감사 로그 조합
//! - [`hooks`] - 변경 연산 전후 훅 (`CrudHooks<T>`, 기본은 no-op)
//! - [`resource`] - 제네릭 HTTP 핸들러와 엔티티 서비스를 잇는 `CrudResource`

pub mod crud_service;
pub mod hooks;
pub mod resource;

pub use crud_service::CrudService;
pub use hooks::{ensure_non_negative, CrudHooks, NoopHooks};
pub use resource::CrudResource;
