//! 애플리케이션 에러 모듈
//!
//! 모든 계층에서 공유하는 [`AppError`](errors::AppError)와 결과 타입 별칭을 제공합니다.

pub mod errors;

pub use errors::*;
