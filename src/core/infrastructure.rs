//! 서비스가 공유하는 인프라 구성 요소 묶음

use std::sync::Arc;
use crate::{
    audit::{AuditLogger, LogAuditLogger, MongoAuditLogger},
    caching::{CacheStore, MemoryCache, RedisClient},
    config::EventConfig,
    db::Database,
    domain::entities::Entity,
    events::BroadcastEventEmitter,
    repositories::{DocumentStore, MemoryRepository, MongoRepository},
};

/// 엔티티 서비스 조립에 필요한 공용 인프라
///
/// `ServiceLocator`에 한 번 등록되고, 각 엔티티 서비스가 생성될 때 조회됩니다.
/// `database`가 없으면 문서 저장소는 메모리 구현이 됩니다.
pub struct Infrastructure {
    pub database: Option<Arc<Database>>,
    pub cache: Arc<dyn CacheStore>,
    pub audit: Arc<dyn AuditLogger>,
    pub events: Arc<BroadcastEventEmitter>,
}

impl Infrastructure {
    /// MongoDB + Redis 구성
    pub fn mongo(database: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        let audit = Arc::new(MongoAuditLogger::new(&database));
        Self {
            database: Some(database),
            cache: redis,
            audit,
            events: Arc::new(BroadcastEventEmitter::new(EventConfig::channel_capacity())),
        }
    }

    /// 외부 저장소 없이 동작하는 구성
    pub fn in_memory() -> Self {
        Self {
            database: None,
            cache: Arc::new(MemoryCache::new()),
            audit: Arc::new(LogAuditLogger),
            events: Arc::new(BroadcastEventEmitter::new(EventConfig::channel_capacity())),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        if self.database.is_some() { "mongo" } else { "memory" }
    }

    /// 엔티티 `T`의 문서 저장소를 생성합니다.
    pub fn store<T: Entity>(&self) -> Arc<dyn DocumentStore<T>> {
        match &self.database {
            Some(db) => Arc::new(MongoRepository::<T>::new(db)),
            None => Arc::new(MemoryRepository::<T>::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;

    #[actix_web::test]
    async fn test_in_memory_infrastructure_builds_independent_stores() {
        let infra = Infrastructure::in_memory();
        assert_eq!(infra.backend_name(), "memory");

        let first = infra.store::<Product>();
        let second = infra.store::<Product>();
        first
            .insert(Product::new("Pen".to_string(), "PN-1".to_string(), 1.0))
            .await
            .unwrap();

        assert_eq!(first.count(Default::default(), false).await.unwrap(), 1);
        assert_eq!(second.count(Default::default(), false).await.unwrap(), 0);
    }
}
