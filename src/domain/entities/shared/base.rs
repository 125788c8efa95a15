//! 모든 엔티티가 공유하는 베이스 trait과 관리(bookkeeping) 필드

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// 베이스 서비스가 관리하는 문서 공통 필드
///
/// 각 엔티티에 `#[serde(flatten)]`으로 포함되어 문서의 최상위 필드로 저장됩니다.
/// 스키마로 강제되지 않으며, 베이스 서비스가 관례적으로 채웁니다.
/// 시각 필드는 BSON `DateTime`으로 저장되어 정렬과 범위 조회가 시간 순서를 따릅니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    /// 생성한 사용자 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// 마지막으로 수정한 사용자 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
    /// 소프트 삭제 여부
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
}

impl EntityMeta {
    pub const CREATED_BY: &'static str = "created_by";
    pub const UPDATED_BY: &'static str = "updated_by";
    pub const CREATED_AT: &'static str = "created_at";
    pub const UPDATED_AT: &'static str = "updated_at";
    pub const IS_DELETED: &'static str = "is_deleted";
    pub const DELETED_BY: &'static str = "deleted_by";
    pub const DELETED_AT: &'static str = "deleted_at";

    /// 클라이언트의 수정 요청으로 변경할 수 없는 필드
    pub const PROTECTED_FIELDS: [&'static str; 8] = [
        "_id",
        Self::CREATED_BY,
        Self::UPDATED_BY,
        Self::CREATED_AT,
        Self::UPDATED_AT,
        Self::IS_DELETED,
        Self::DELETED_BY,
        Self::DELETED_AT,
    ];

    /// 새로 생성되는 문서의 관리 필드를 채웁니다.
    ///
    /// 삭제 관련 필드는 항상 초기화됩니다.
    pub fn stamp_created(&mut self, actor: Option<&str>, now: DateTime) {
        self.created_by = actor.map(str::to_string);
        self.updated_by = actor.map(str::to_string);
        self.created_at = Some(now);
        self.updated_at = Some(now);
        self.is_deleted = false;
        self.deleted_by = None;
        self.deleted_at = None;
    }
}

/// 베이스 서비스가 다룰 수 있는 문서 엔티티
///
/// `CrudService<T>`의 타입 매개변수 `T`가 만족해야 하는 계약입니다.
/// 엔티티는 고유 식별자(`_id`)와 [`EntityMeta`]만 노출하면 되고,
/// 나머지 필드는 베이스 계층에서 불투명하게 취급됩니다.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// 이벤트 이름, 캐시 키, 감사 로그에 쓰이는 단수형 이름 (예: "product")
    const NAME: &'static str;
    /// MongoDB 컬렉션 이름
    const COLLECTION: &'static str;
    /// 검색 대상 문자열 필드
    const SEARCH_FIELDS: &'static [&'static str];
    /// 조회 인덱스를 생성할 필드
    const INDEXED_FIELDS: &'static [&'static str] = &[];
    /// 삭제되지 않은 문서 사이에서 값이 유일해야 하는 필드
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    /// HTTP 응답용 DTO
    type Response: Serialize + From<Self> + Send;

    fn id(&self) -> Option<ObjectId>;

    fn set_id(&mut self, id: ObjectId);

    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    /// ID를 16진수 문자열로 반환합니다.
    fn id_string(&self) -> Option<String> {
        self.id().map(|id| id.to_hex())
    }
}
