//! 엔티티 라이프사이클 이벤트
//!
//! 변경 연산이 성공하면 `{entity}.{action}` 이름의 이벤트가 발행됩니다
//! (예: `product.created`, `employee.soft_removed`).
//! 발행은 fire-and-forget이며 구독자가 없어도 에러가 아닙니다.
//!
//! ```rust,ignore
//! let emitter = BroadcastEventEmitter::new(EventConfig::channel_capacity());
//! let mut rx = emitter.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(event) = rx.recv().await {
//!         log::info!("event: {}", event.name);
//!     }
//! });
//! ```

use chrono::{DateTime, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// 발행되는 작업 종류
pub mod actions {
    pub const CREATED: &str = "created";
    pub const UPDATED: &str = "updated";
    pub const REMOVED: &str = "removed";
    pub const SOFT_REMOVED: &str = "soft_removed";
    pub const RESTORED: &str = "restored";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEvent {
    pub id: Uuid,
    /// `{entity}.{action}`
    pub name: String,
    pub entity: String,
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// 작업 결과 문서 (JSON)
    pub payload: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

impl EntityEvent {
    pub fn new(
        entity: &str,
        action: &str,
        entity_id: &str,
        actor: Option<&str>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("{}.{}", entity, action),
            entity: entity.to_string(),
            entity_id: entity_id.to_string(),
            actor: actor.map(str::to_string),
            payload,
            occurred_at: Utc::now(),
        }
    }
}

/// 이벤트 발행기
///
/// 동기 메서드이며 실패를 반환하지 않습니다.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: EntityEvent);
}

/// `tokio::sync::broadcast` 기반 인프로세스 발행기
pub struct BroadcastEventEmitter {
    sender: broadcast::Sender<EntityEvent>,
}

impl BroadcastEventEmitter {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EntityEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventEmitter for BroadcastEventEmitter {
    fn emit(&self, event: EntityEvent) {
        let name = event.name.clone();
        match self.sender.send(event) {
            Ok(receivers) => debug!("이벤트 발행: {} ({} subscribers)", name, receivers),
            Err(_) => trace!("구독자 없음, 이벤트 폐기: {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_name_format() {
        let event = EntityEvent::new("product", actions::SOFT_REMOVED, "abc", Some("u1"), json!({}));

        assert_eq!(event.name, "product.soft_removed");
        assert_eq!(event.actor.as_deref(), Some("u1"));
        assert_ne!(event.id, EntityEvent::new("product", actions::CREATED, "abc", None, json!({})).id);
    }

    #[actix_web::test]
    async fn test_subscribers_receive_events() {
        let emitter = BroadcastEventEmitter::new(8);
        let mut rx = emitter.subscribe();

        emitter.emit(EntityEvent::new("employee", actions::CREATED, "e1", None, json!({"email": "a@b.c"})));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, "employee.created");
        assert_eq!(event.payload["email"], "a@b.c");
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let emitter = BroadcastEventEmitter::new(8);
        assert_eq!(emitter.subscriber_count(), 0);

        emitter.emit(EntityEvent::new("product", actions::REMOVED, "p1", None, json!(null)));
    }
}
