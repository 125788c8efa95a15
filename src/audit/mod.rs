//! 감사 로그 모듈
//!
//! 변경 연산(생성, 수정, 삭제, 소프트 삭제, 복구)마다 누가 무엇을 했는지 기록합니다.
//! 기록은 최선 노력(best-effort) 방식이며, 실패해도 원래 작업 결과는 바뀌지 않습니다.
//!
//! - [`MongoAuditLogger`] - `audit_logs` 컬렉션에 저장
//! - [`MemoryAuditLogger`] - 메모리에 보관 (테스트)
//! - [`LogAuditLogger`] - 애플리케이션 로그로 출력

pub mod logger;
pub mod memory;
pub mod mongo;

pub use logger::{AuditAction, AuditEntry, AuditLogger, LogAuditLogger};
pub use memory::MemoryAuditLogger;
pub use mongo::MongoAuditLogger;
