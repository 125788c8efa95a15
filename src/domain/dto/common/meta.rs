//! 응답용 관리 필드

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use crate::domain::entities::EntityMeta;

/// [`EntityMeta`]의 응답 표현
///
/// 저장소의 BSON `DateTime`은 RFC 3339 문자열로 노출됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

fn rfc3339(value: Option<DateTime>) -> Option<String> {
    value.and_then(|dt| dt.try_to_rfc3339_string().ok())
}

impl From<EntityMeta> for MetaResponse {
    fn from(meta: EntityMeta) -> Self {
        Self {
            created_by: meta.created_by,
            updated_by: meta.updated_by,
            created_at: rfc3339(meta.created_at),
            updated_at: rfc3339(meta.updated_at),
            is_deleted: meta.is_deleted,
            deleted_by: meta.deleted_by,
            deleted_at: rfc3339(meta.deleted_at),
        }
    }
}
