//! 캐시 저장소 추상화와 키 규칙

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use crate::errors::errors::AppError;

/// JSON 문자열 단위의 캐시 저장소
///
/// 직렬화는 호출하는 쪽에서 담당하므로 trait 객체(`Arc<dyn CacheStore>`)로 쓸 수 있습니다.
/// 베이스 서비스는 이 trait의 에러를 로그만 남기고 무시합니다.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError>;

    /// 값을 `ttl_seconds` 동안 저장합니다.
    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;

    /// `*` 와일드카드 패턴에 맞는 모든 키를 삭제하고 삭제된 개수를 반환합니다.
    async fn delete_pattern(&self, pattern: &str) -> Result<u64, AppError>;
}

/// 엔티티별 캐시 키 생성기
///
/// - 단건: `{prefix}:{entity}:{id}`
/// - 목록/검색: `{prefix}:{entity}:list:{sha256(조건)}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: String,
    entity: String,
}

impl CacheKeys {
    pub fn new(prefix: &str, entity: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            entity: entity.to_string(),
        }
    }

    pub fn record(&self, id: &str) -> String {
        format!("{}:{}:{}", self.prefix, self.entity, id)
    }

    /// 조회 조건 문자열을 해시해 목록 키를 만듭니다.
    pub fn list(&self, fingerprint: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(fingerprint.as_bytes());
        format!("{}:{}:list:{:x}", self.prefix, self.entity, hasher.finalize())
    }

    /// 이 엔티티의 모든 목록/검색 키에 맞는 패턴
    pub fn list_pattern(&self) -> String {
        format!("{}:{}:list:*", self.prefix, self.entity)
    }
}

/// `*`(임의 문자열)와 `?`(임의 한 글자)를 지원하는 glob 매칭
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();

    let (mut p, mut k) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while k < key.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == key[k]) {
            p += 1;
            k += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, k));
            p += 1;
        } else if let Some((star_p, star_k)) = star {
            p = star_p + 1;
            k = star_k + 1;
            star = Some((star_p, star_k + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
