//! # Domain Models
//!
//! 엔티티로 저장되지 않는 요청 컨텍스트 모델들입니다.
//!
//! - [`RequestActor`](request::request_actor::RequestActor) - `X-User-Id` 헤더에서
//!   추출한 행위자. 관리 필드와 감사 로그에 기록됩니다.

pub mod request;

pub use request::request_actor::{RequestActor, ACTOR_HEADER};
