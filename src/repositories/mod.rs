//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 베이스 서비스는 [`DocumentStore`] trait 객체만 알고 있으며,
//! 실행 모드(`STORE_BACKEND`)에 따라 구현이 선택됩니다.
//!
//! - [`MongoRepository`] - MongoDB 컬렉션 (기본값)
//! - [`MemoryRepository`] - 프로세스 내부 저장소 (테스트, 로컬 실행)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::{DocumentStore, ListQuery, MemoryRepository};
//!
//! let store = MemoryRepository::<Product>::new();
//! let saved = store.insert(product).await?;
//! let page = store.find_page(&ListQuery::new(1, 10)).await?;
//! ```

pub mod document_store;
pub mod mongo_repo;
pub mod memory_repo;

pub use document_store::{DocumentStore, ListQuery};
pub use mongo_repo::MongoRepository;
pub use memory_repo::MemoryRepository;
