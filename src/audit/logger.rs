//! 감사 로그 항목과 기록기 trait

use std::fmt;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use crate::errors::errors::AppError;

/// 감사 대상 작업 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Remove,
    SoftRemove,
    Restore,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Remove => "remove",
            AuditAction::SoftRemove => "soft_remove",
            AuditAction::Restore => "restore",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 감사 로그 한 건
///
/// `changes`에는 수정 요청으로 실제 적용된 필드만 담깁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: AuditAction,
    /// 엔티티 이름 (예: "product")
    pub entity: String,
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(action: AuditAction, entity: &str, entity_id: &str, actor: Option<&str>) -> Self {
        Self {
            action,
            entity: entity.to_string(),
            entity_id: entity_id.to_string(),
            actor: actor.map(str::to_string),
            changes: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_changes(mut self, changes: serde_json::Value) -> Self {
        self.changes = Some(changes);
        self
    }
}

/// 감사 로그 기록기
///
/// 기록 실패는 호출한 작업을 실패시키지 않습니다. 베이스 서비스가
/// 에러를 `warn!`으로 남기고 무시합니다.
#[async_trait]
pub trait AuditLogger: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> Result<(), AppError>;
}

/// 애플리케이션 로그로만 감사 항목을 남기는 기록기
///
/// 저장소 없이 실행되는 메모리 모드의 기본값입니다.
#[derive(Debug, Default, Clone)]
pub struct LogAuditLogger;

#[async_trait]
impl AuditLogger for LogAuditLogger {
    async fn record(&self, entry: AuditEntry) -> Result<(), AppError> {
        info!(
            "[audit] {} {}:{} by {}",
            entry.action,
            entry.entity,
            entry.entity_id,
            entry.actor.as_deref().unwrap_or("anonymous")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serializes_snake_case() {
        let json = serde_json::to_string(&AuditAction::SoftRemove).unwrap();
        assert_eq!(json, "\"soft_remove\"");
        assert_eq!(AuditAction::SoftRemove.to_string(), "soft_remove");
    }

    #[test]
    fn test_entry_skips_empty_fields() {
        let entry = AuditEntry::new(AuditAction::Remove, "product", "abc", None);
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["action"], "remove");
        assert_eq!(value["entity_id"], "abc");
        assert!(value.get("actor").is_none());
        assert!(value.get("changes").is_none());
    }
}
