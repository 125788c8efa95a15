//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정은 환경 변수에서 읽으며, `PROFILE`에 따라 `.env.dev` /
//! `.env.prod` 파일이 먼저 로드됩니다 (`main.rs` 참고).
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 실행 환경 (development | test | staging | production)
//! export ENVIRONMENT="development"
//!
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export SERVER_WORKERS="4"
//!
//! # 저장소
//! export STORE_BACKEND="mongo"        # mongo | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="crud_service_dev"
//! export MONGODB_MAX_POOL_SIZE="20"
//! export MONGODB_SERVER_SELECTION_TIMEOUT_SECS="5"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 캐시 / 페이지네이션
//! export CACHE_TTL_SECONDS="600"
//! export CACHE_KEY_PREFIX="crud"
//! export PAGINATION_DEFAULT_LIMIT="10"
//! export PAGINATION_MAX_LIMIT="100"
//!
//! # 감사 로그 / 이벤트
//! export AUDIT_COLLECTION="audit_logs"
//! export EVENT_CHANNEL_CAPACITY="256"
//!
//! # Rate Limiting (main.rs에서 로드)
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```

pub mod data_config;

pub use data_config::*;
