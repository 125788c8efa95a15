//! # Domain Layer
//!
//! 엔티티, DTO, 요청 모델을 정의하는 도메인 계층입니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← MongoDB 문서와 매핑되는 엔티티
//! ├── models/       ← 요청 컨텍스트 모델 (RequestActor)
//! └── dto/          ← 요청/응답 데이터 전송 객체
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use models::*;
