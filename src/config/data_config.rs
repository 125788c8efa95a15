//! 데이터 및 서버 설정 관리 모듈
//!
//! 서버, 캐시, 페이지네이션, 감사 로그, 이벤트 채널 관련 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 환경 변수를 파싱하고, 없거나 잘못된 값이면 기본값을 사용합니다.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 8080
    pub fn port() -> u16 {
        env_or("PORT", 8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 워커 스레드 수. 기본값: 4
    pub fn workers() -> usize {
        env_or("SERVER_WORKERS", 4)
    }

    /// `host:port` 형태의 바인딩 주소
    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 캐시 설정
///
/// # Environment Variables
///
/// - `CACHE_TTL_SECONDS`: 캐시 항목 유효 시간 (기본값: 600초)
/// - `CACHE_KEY_PREFIX`: 모든 캐시 키의 접두사 (기본값: "crud")
pub struct CacheConfig;

impl CacheConfig {
    pub fn ttl_seconds() -> u64 {
        env_or("CACHE_TTL_SECONDS", 600)
    }

    pub fn key_prefix() -> String {
        env::var("CACHE_KEY_PREFIX").unwrap_or_else(|_| "crud".to_string())
    }
}

/// 목록 조회 페이지네이션 설정
pub struct PaginationConfig;

impl PaginationConfig {
    /// `limit`이 주어지지 않았을 때의 페이지 크기. 기본값: 10
    pub fn default_limit() -> u64 {
        env_or("PAGINATION_DEFAULT_LIMIT", 10)
    }

    /// 허용되는 최대 페이지 크기. 기본값: 100
    pub fn max_limit() -> u64 {
        env_or("PAGINATION_MAX_LIMIT", 100)
    }
}

/// 감사 로그 설정
pub struct AuditConfig;

impl AuditConfig {
    /// 감사 로그가 저장되는 MongoDB 컬렉션. 기본값: "audit_logs"
    pub fn collection() -> String {
        env::var("AUDIT_COLLECTION").unwrap_or_else(|_| "audit_logs".to_string())
    }
}

/// 라이프사이클 이벤트 채널 설정
pub struct EventConfig;

impl EventConfig {
    /// broadcast 채널 버퍼 크기. 기본값: 256
    pub fn channel_capacity() -> usize {
        env_or("EVENT_CHANNEL_CAPACITY", 256)
    }
}

/// 저장소 백엔드 종류
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// MongoDB + Redis
    Mongo,
    /// 프로세스 내 메모리 (로컬 실행, 데모용)
    Memory,
}

impl StoreBackend {
    /// `STORE_BACKEND` 환경 변수를 읽습니다. 기본값: Mongo
    pub fn current() -> Self {
        match env::var("STORE_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" | "mem" => StoreBackend::Memory,
            _ => StoreBackend::Mongo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from_str("development"),
            Environment::Development
        );
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("STAGE"), Environment::Staging);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        assert_eq!(env_or::<u64>("CRUD_TEST_SURELY_UNSET_VARIABLE", 42), 42);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }

    #[test]
    fn test_cache_and_pagination_defaults() {
        if env::var("CACHE_TTL_SECONDS").is_err() {
            assert_eq!(CacheConfig::ttl_seconds(), 600);
        }
        if env::var("PAGINATION_MAX_LIMIT").is_err() {
            assert_eq!(PaginationConfig::max_limit(), 100);
        }
        if env::var("PAGINATION_DEFAULT_LIMIT").is_err() {
            assert_eq!(PaginationConfig::default_limit(), 10);
        }
    }
}
