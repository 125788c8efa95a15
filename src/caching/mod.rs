//! 캐싱 계층 모듈
//!
//! 조회 결과를 JSON 문자열로 저장하는 캐시 저장소를 제공합니다.
//! 베이스 서비스는 조회 결과를 저장하고, 변경 연산 후 관련 키를 무효화합니다.
//!
//! # 주요 기능
//!
//! - [`CacheStore`] trait과 키 규칙([`CacheKeys`])
//! - Redis 구현 ([`RedisClient`])
//! - 메모리 구현 ([`MemoryCache`])
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::{CacheKeys, CacheStore, RedisClient};
//!
//! let cache = RedisClient::new().await?;
//! let keys = CacheKeys::new("crud", "product");
//!
//! cache.set_raw(&keys.record(&id), json, 600).await?;
//! cache.delete_pattern(&keys.list_pattern()).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! CACHE_TTL_SECONDS=600
//! CACHE_KEY_PREFIX=crud
//! ```

pub mod cache_store;
pub mod memory;
pub mod redis;

pub use cache_store::{CacheKeys, CacheStore};
pub use memory::MemoryCache;
pub use self::redis::RedisClient;
