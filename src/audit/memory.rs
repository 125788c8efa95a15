//! 메모리 감사 로그 기록기

use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::errors::errors::AppError;
use super::logger::{AuditEntry, AuditLogger};

/// 기록된 항목을 순서대로 보관합니다.
#[derive(Default)]
pub struct MemoryAuditLogger {
    entries: RwLock<Vec<AuditEntry>>,
}

impl MemoryAuditLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AuditLogger for MemoryAuditLogger {
    async fn record(&self, entry: AuditEntry) -> Result<(), AppError> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}
