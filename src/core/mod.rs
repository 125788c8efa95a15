//! # Core Framework Module
//!
//! 서비스 조립을 위한 핵심 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입별 싱글톤 인스턴스 보관 (Spring의 ApplicationContext 역할)
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 서비스 등록
//!
//! ### [`infrastructure`] - 공용 인프라
//! - **Infrastructure**: 캐시, 감사 로거, 이벤트 발행기, (선택) MongoDB 연결
//! - 실행 모드(`STORE_BACKEND`)에 따라 MongoDB/메모리 저장소를 만들어 줌
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! use crate::core::{Infrastructure, ServiceLocator};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     // 1. 인프라 등록
//!     let database = Arc::new(Database::new().await?);
//!     let redis = Arc::new(RedisClient::new().await?);
//!     ServiceLocator::set(Arc::new(Infrastructure::mongo(database, redis)));
//!
//!     // 2. 모든 엔티티 서비스 생성
//!     ServiceLocator::initialize_all().await?;
//!
//!     // 3. 웹 서버 시작
//!     HttpServer::new(|| App::new().configure(configure_all_routes))
//!         .bind("0.0.0.0:8080")?
//!         .run()
//!         .await
//! }
//! ```
//!
//! ## 트러블슈팅
//!
//! ### 미등록 타입 에러
//! ```text
//! panic: Service not found: crud_service_backend::core::infrastructure::Infrastructure ...
//! ```
//! **해결**: 서비스를 조회하기 전에 `ServiceLocator::set()`으로 인프라를 등록

pub mod infrastructure;
pub mod registry;

pub use infrastructure::Infrastructure;
pub use registry::*;
