//! 문서 저장소 추상화
//!
//! 베이스 서비스는 이 trait을 통해서만 저장소에 접근합니다.
//! MongoDB 구현([`MongoRepository`](super::mongo_repo::MongoRepository))과
//! 메모리 구현([`MemoryRepository`](super::memory_repo::MemoryRepository))이 같은 의미를 가집니다.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use crate::domain::dto::common::SortOrder;
use crate::domain::entities::{Entity, EntityMeta};
use crate::errors::errors::AppError;
use crate::utils::string_utils::escape_regex;

/// 페이지 조회 조건
///
/// `page`는 1부터 시작합니다. `filter`는 최상위 필드의 동등 비교 조건이며,
/// `include_deleted`가 false이면 소프트 삭제된 문서는 제외됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u64,
    pub limit: u64,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub filter: Document,
    pub include_deleted: bool,
}

impl ListQuery {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit,
            sort_by: EntityMeta::CREATED_AT.to_string(),
            sort_order: SortOrder::Desc,
            filter: Document::new(),
            include_deleted: false,
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = field.into();
        self.sort_order = order;
        self
    }

    pub fn with_filter(mut self, filter: Document) -> Self {
        self.filter = filter;
        self
    }

    /// 건너뛸 문서 수
    pub fn skip(&self) -> u64 {
        (self.page.max(1) - 1).saturating_mul(self.limit)
    }

    /// 캐시 키 생성을 위한 조건 문자열
    pub fn fingerprint(&self) -> String {
        format!(
            "page={}&limit={}&sort={}:{}&deleted={}&filter={}",
            self.page,
            self.limit,
            self.sort_by,
            self.sort_order.as_i32(),
            self.include_deleted,
            self.filter
        )
    }
}

/// 엔티티 `T`에 대한 문서 저장소
///
/// 모든 ID 인자는 이미 검증된 `ObjectId`입니다. 없는 문서는 에러가 아니라
/// `None`으로 반환되며, 404 변환은 서비스 계층이 담당합니다.
#[async_trait]
pub trait DocumentStore<T: Entity>: Send + Sync {
    /// 새 문서를 저장하고 ID가 채워진 엔티티를 반환합니다.
    async fn insert(&self, entity: T) -> Result<T, AppError>;

    /// 삭제되지 않은 문서를 ID로 조회합니다.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError>;

    /// 조건에 맞는 삭제되지 않은 첫 문서를 조회합니다.
    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError>;

    async fn find_page(&self, query: &ListQuery) -> Result<Vec<T>, AppError>;

    async fn count(&self, filter: Document, include_deleted: bool) -> Result<u64, AppError>;

    /// 검색 필드 전체에 대해 대소문자 구분 없는 부분 일치 검색을 수행합니다.
    ///
    /// 현재 페이지의 문서와 조건에 맞는 전체 문서 수를 반환합니다.
    async fn search(&self, term: &str, query: &ListQuery) -> Result<(Vec<T>, u64), AppError>;

    /// `changes`를 `$set`으로 적용하고 변경 후 문서를 반환합니다.
    async fn update_by_id(&self, id: ObjectId, changes: Document) -> Result<Option<T>, AppError>;

    /// 문서를 영구 삭제하고 삭제된 문서를 반환합니다.
    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError>;

    /// 삭제되지 않은 문서에 삭제 표시를 남깁니다.
    async fn mark_deleted(
        &self,
        id: ObjectId,
        actor: Option<&str>,
        at: DateTime,
    ) -> Result<Option<T>, AppError>;

    /// 소프트 삭제된 문서의 삭제 표시를 해제합니다.
    async fn restore(
        &self,
        id: ObjectId,
        actor: Option<&str>,
        at: DateTime,
    ) -> Result<Option<T>, AppError>;

    async fn create_indexes(&self) -> Result<(), AppError>;
}

/// 삭제되지 않은 문서만 고르는 조건을 추가합니다.
///
/// 필드가 없는 문서도 삭제되지 않은 것으로 취급합니다.
pub fn exclude_deleted(mut filter: Document) -> Document {
    filter.insert(EntityMeta::IS_DELETED, doc! { "$ne": true });
    filter
}

/// 검색 필드마다 이스케이프된 정규식을 만들어 `$or`로 묶습니다.
pub fn search_filter(fields: &[&str], term: &str) -> Document {
    let pattern = escape_regex(term);
    let clauses: Vec<Bson> = fields
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
            Bson::Document(clause)
        })
        .collect();

    doc! { "$or": clauses }
}

/// 사용자 ID를 BSON 값으로 변환합니다 (없으면 Null).
pub fn actor_bson(actor: Option<&str>) -> Bson {
    actor.map_or(Bson::Null, |a| Bson::String(a.to_string()))
}
