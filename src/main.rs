//! CRUD 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! `STORE_BACKEND`에 따라 MongoDB + Redis 또는 메모리 저장소로 동작합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{debug, error, info, warn};
use tokio::sync::broadcast::error::RecvError;
use crud_service_backend::caching::RedisClient;
use crud_service_backend::config::{Environment, ServerConfig, StoreBackend};
use crud_service_backend::core::{registry::ServiceLocator, Infrastructure};
use crud_service_backend::db::Database;
use crud_service_backend::domain::entities::{Employee, Entity, Product};
use crud_service_backend::routes::configure_all_routes;
use crud_service_backend::services::{employees::EmployeeService, products::ProductService};
use crud_service_backend::utils::display_terminal::print_server_info;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 CRUD 서비스 시작중... (environment: {:?})", Environment::current());

    // 인프라 초기화 및 등록
    let infrastructure = Arc::new(initialize_infrastructure().await?);
    ServiceLocator::set(infrastructure.clone());

    // 모든 서비스 초기화
    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    ensure_indexes(&infrastructure).await;
    spawn_event_logger(&infrastructure);

    // HTTP 서버 시작
    start_http_server(infrastructure.backend_name()).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
/// 바인딩 주소와 워커 수는 `HOST`, `PORT`, `SERVER_WORKERS`로 설정합니다.
async fn start_http_server(backend: &str) -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();
    let workers = ServerConfig::workers();

    print_server_info(backend, &bind_address, workers);
    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let products = web::Data::from(ProductService::instance());
    let employees = web::Data::from(EmployeeService::instance());

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(products.clone())
            .app_data(employees.clone())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(workers)
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 기본값은 `info,actix_web=info`이며 `RUST_LOG`로 덮어쓸 수 있습니다.
///
/// ```bash
/// RUST_LOG=crud_service_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 저장소 백엔드에 맞는 인프라를 구성합니다
///
/// MongoDB 또는 Redis 연결에 실패하면 에러를 반환하고 애플리케이션이 종료됩니다.
async fn initialize_infrastructure() -> io::Result<Infrastructure> {
    match StoreBackend::current() {
        StoreBackend::Memory => {
            warn!("⚠️ 메모리 저장소로 실행합니다. 재시작 시 데이터가 사라집니다");
            Ok(Infrastructure::in_memory())
        }
        StoreBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::new()
                .await
                .map_err(|e| io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;
            info!("✅ MongoDB 연결 성공");

            let redis_client = RedisClient::new()
                .await
                .map_err(|e| io::Error::other(format!("Redis 연결 실패: {}", e)))?;
            info!("✅ Redis 연결 성공");

            Ok(Infrastructure::mongo(Arc::new(database), Arc::new(redis_client)))
        }
    }
}

/// 엔티티 컬렉션 인덱스를 생성합니다 (실패는 경고만 남김)
async fn ensure_indexes(infrastructure: &Infrastructure) {
    if let Err(e) = infrastructure.store::<Product>().create_indexes().await {
        warn!("{} 인덱스 생성 실패: {}", Product::COLLECTION, e);
    }
    if let Err(e) = infrastructure.store::<Employee>().create_indexes().await {
        warn!("{} 인덱스 생성 실패: {}", Employee::COLLECTION, e);
    }
}

/// 라이프사이클 이벤트를 로그로 남기는 구독자를 시작합니다
fn spawn_event_logger(infrastructure: &Infrastructure) {
    let mut receiver = infrastructure.events.subscribe();

    actix_web::rt::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => debug!("📣 {} {} (actor: {:?})", event.name, event.entity_id, event.actor),
                Err(RecvError::Lagged(skipped)) => warn!("이벤트 구독자가 {}개 이벤트를 놓쳤습니다", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// CORS 설정을 구성합니다
///
/// 개발 환경에서는 모든 Origin을 허용하고,
/// 그 외 환경에서는 로컬 프론트엔드 개발 서버와 자체 서버 Origin만 허용합니다.
fn configure_cors() -> Cors {
    if Environment::current() == Environment::Development {
        return Cors::permissive();
    }

    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-user-id"),
        ])
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
