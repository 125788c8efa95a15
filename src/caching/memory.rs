//! 프로세스 내부 TTL 캐시

use std::collections::HashMap;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::errors::errors::AppError;
use super::cache_store::{glob_match, CacheStore};

/// 만료 시각을 가진 메모리 캐시
///
/// 만료된 항목은 조회 시점과 쓰기(`set_raw`, `delete_pattern`) 시점에 제거됩니다.
/// 만료 시각이 `Instant`로 표현할 수 없을 만큼 먼 TTL은 만료 없음(`None`)으로 저장됩니다.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (String, Option<Instant>)>>,
}

fn is_live(expires_at: &Option<Instant>, now: Instant) -> bool {
    expires_at.is_none_or(|at| at > now)
}

fn prune_expired(entries: &mut HashMap<String, (String, Option<Instant>)>) {
    let now = Instant::now();
    entries.retain(|_, (_, expires_at)| is_live(expires_at, now));
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 만료되지 않은 키 목록
    pub async fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .iter()
            .filter(|(_, (_, expires_at))| is_live(expires_at, now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// 저장된 항목 수 (아직 제거되지 않은 만료 항목 포함)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        matches!(self.get_raw(key).await, Ok(Some(_)))
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some((value, expires_at)) if is_live(expires_at, Instant::now()) => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), AppError> {
        let expires_at = Instant::now().checked_add(Duration::from_secs(ttl_seconds));
        let mut entries = self.entries.write().await;
        prune_expired(&mut entries);
        entries.insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64, AppError> {
        let mut entries = self.entries.write().await;
        prune_expired(&mut entries);
        let before = entries.len();
        entries.retain(|key, _| !glob_match(pattern, key));
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_set_get_delete() {
        let cache = MemoryCache::new();

        cache.set_raw("crud:product:1", "{}".to_string(), 60).await.unwrap();
        assert_eq!(cache.get_raw("crud:product:1").await.unwrap().as_deref(), Some("{}"));

        cache.delete("crud:product:1").await.unwrap();
        assert!(cache.get_raw("crud:product:1").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_zero_ttl_expires_immediately() {
        let cache = MemoryCache::new();

        cache.set_raw("k", "v".to_string(), 0).await.unwrap();
        assert!(cache.get_raw("k").await.unwrap().is_none());
        assert!(cache.keys().await.is_empty());
    }

    #[actix_web::test]
    async fn test_huge_ttl_never_expires() {
        let cache = MemoryCache::new();

        cache.set_raw("k", "v".to_string(), u64::MAX).await.unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(cache.keys().await, vec!["k".to_string()]);
    }

    #[actix_web::test]
    async fn test_writes_prune_expired_entries() {
        let cache = MemoryCache::new();
        cache.set_raw("crud:product:1", "{}".to_string(), 0).await.unwrap();
        cache.set_raw("crud:product:2", "{}".to_string(), 0).await.unwrap();

        cache.set_raw("crud:product:3", "{}".to_string(), 60).await.unwrap();
        assert_eq!(cache.len().await, 1);

        cache.set_raw("crud:product:4", "{}".to_string(), 0).await.unwrap();
        let removed = cache.delete_pattern("crud:employee:*").await.unwrap();
        assert_eq!(removed, 0);
        assert_eq!(cache.len().await, 1);
        assert!(cache.contains_key("crud:product:3").await);
    }

    #[actix_web::test]
    async fn test_delete_pattern_only_touches_matching_keys() {
        let cache = MemoryCache::new();
        for key in ["crud:product:list:a", "crud:product:list:b", "crud:product:1", "crud:employee:list:a"] {
            cache.set_raw(key, "[]".to_string(), 60).await.unwrap();
        }

        let removed = cache.delete_pattern("crud:product:list:*").await.unwrap();

        assert_eq!(removed, 2);
        assert!(cache.contains_key("crud:product:1").await);
        assert!(cache.contains_key("crud:employee:list:a").await);
        assert!(!cache.contains_key("crud:product:list:a").await);
    }
}
