//! MongoDB 감사 로그 기록기

use async_trait::async_trait;
use mongodb::Collection;
use crate::config::AuditConfig;
use crate::db::Database;
use crate::errors::errors::AppError;
use super::logger::{AuditEntry, AuditLogger};

/// 감사 항목을 `AUDIT_COLLECTION` 컬렉션(기본값 `audit_logs`)에 추가합니다.
pub struct MongoAuditLogger {
    collection: Collection<AuditEntry>,
}

impl MongoAuditLogger {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<AuditEntry>(&AuditConfig::collection()),
        }
    }
}

#[async_trait]
impl AuditLogger for MongoAuditLogger {
    async fn record(&self, entry: AuditEntry) -> Result<(), AppError> {
        self.collection.insert_one(&entry).await?;
        Ok(())
    }
}
