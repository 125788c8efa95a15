//! # MongoDB 문서 저장소
//!
//! 엔티티의 `COLLECTION` 컬렉션에 대한 [`DocumentStore`] 구현입니다.
//!
//! ## 특징
//!
//! - **원자적 변경**: 수정/삭제/소프트 삭제는 모두 `find_one_and_*` 한 번으로 처리
//! - **소프트 삭제 필터**: `is_deleted != true` 조건을 자동으로 추가
//! - **인덱스 관리**: `created_at`, `is_deleted`, 엔티티별 조회 필드, 유일 필드의 부분 unique 인덱스

use std::marker::PhantomData;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::{Entity, EntityMeta},
    errors::errors::AppError,
};
use super::document_store::{actor_bson, exclude_deleted, search_filter, DocumentStore, ListQuery};

/// MongoDB 기반 문서 저장소
///
/// ```rust,ignore
/// let db = Database::new().await?;
/// let store: Arc<dyn DocumentStore<Product>> = Arc::new(MongoRepository::<Product>::new(&db));
/// store.create_indexes().await?;
/// ```
pub struct MongoRepository<T: Entity> {
    collection: Collection<T>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> MongoRepository<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<T>(T::COLLECTION),
            _entity: PhantomData,
        }
    }

    fn by_id(id: ObjectId) -> Document {
        doc! { "_id": id }
    }

    fn sort_document(query: &ListQuery) -> Document {
        let order = query.sort_order.as_i32();
        let mut sort = Document::new();
        sort.insert(query.sort_by.as_str(), order);
        // 동일한 정렬 값 사이의 순서를 고정
        if query.sort_by != "_id" {
            sort.insert("_id", order);
        }
        sort
    }

    fn scoped_filter(filter: Document, include_deleted: bool) -> Document {
        if include_deleted {
            filter
        } else {
            exclude_deleted(filter)
        }
    }

    async fn fetch(&self, filter: Document, query: &ListQuery) -> Result<Vec<T>, AppError> {
        let cursor = self
            .collection
            .find(filter)
            .sort(Self::sort_document(query))
            .skip(query.skip())
            .limit(query.limit as i64)
            .await?;

        Ok(cursor.try_collect::<Vec<T>>().await?)
    }
}

#[async_trait]
impl<T: Entity> DocumentStore<T> for MongoRepository<T> {
    async fn insert(&self, mut entity: T) -> Result<T, AppError> {
        let result = self.collection.insert_one(&entity).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string()))?;
        entity.set_id(id);

        debug!("{} 문서 생성: {}", T::COLLECTION, id);
        Ok(entity)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        Ok(self.collection.find_one(exclude_deleted(Self::by_id(id))).await?)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError> {
        Ok(self.collection.find_one(exclude_deleted(filter)).await?)
    }

    async fn find_page(&self, query: &ListQuery) -> Result<Vec<T>, AppError> {
        let filter = Self::scoped_filter(query.filter.clone(), query.include_deleted);
        self.fetch(filter, query).await
    }

    async fn count(&self, filter: Document, include_deleted: bool) -> Result<u64, AppError> {
        let filter = Self::scoped_filter(filter, include_deleted);
        Ok(self.collection.count_documents(filter).await?)
    }

    async fn search(&self, term: &str, query: &ListQuery) -> Result<(Vec<T>, u64), AppError> {
        let mut filter = Self::scoped_filter(query.filter.clone(), query.include_deleted);
        for (key, value) in search_filter(T::SEARCH_FIELDS, term) {
            filter.insert(key, value);
        }

        let total = self.collection.count_documents(filter.clone()).await?;
        let items = self.fetch(filter, query).await?;
        Ok((items, total))
    }

    async fn update_by_id(&self, id: ObjectId, changes: Document) -> Result<Option<T>, AppError> {
        let updated = self
            .collection
            .find_one_and_update(exclude_deleted(Self::by_id(id)), doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        Ok(self.collection.find_one_and_delete(Self::by_id(id)).await?)
    }

    async fn mark_deleted(
        &self,
        id: ObjectId,
        actor: Option<&str>,
        at: DateTime,
    ) -> Result<Option<T>, AppError> {
        let mut set = Document::new();
        set.insert(EntityMeta::IS_DELETED, true);
        set.insert(EntityMeta::DELETED_BY, actor_bson(actor));
        set.insert(EntityMeta::DELETED_AT, at);
        set.insert(EntityMeta::UPDATED_BY, actor_bson(actor));
        set.insert(EntityMeta::UPDATED_AT, at);

        let updated = self
            .collection
            .find_one_and_update(exclude_deleted(Self::by_id(id)), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn restore(
        &self,
        id: ObjectId,
        actor: Option<&str>,
        at: DateTime,
    ) -> Result<Option<T>, AppError> {
        let mut filter = Self::by_id(id);
        filter.insert(EntityMeta::IS_DELETED, true);

        let mut set = Document::new();
        set.insert(EntityMeta::IS_DELETED, false);
        set.insert(EntityMeta::UPDATED_BY, actor_bson(actor));
        set.insert(EntityMeta::UPDATED_AT, at);

        let mut unset = Document::new();
        unset.insert(EntityMeta::DELETED_BY, "");
        unset.insert(EntityMeta::DELETED_AT, "");

        let restored = self
            .collection
            .find_one_and_update(filter, doc! { "$set": set, "$unset": unset })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(restored)
    }

    /// 컬렉션 인덱스 생성
    ///
    /// 1. `created_at` 내림차순 (기본 정렬)
    /// 2. `is_deleted` (소프트 삭제 필터)
    /// 3. 엔티티의 `INDEXED_FIELDS` 각각 (조회 최적화)
    /// 4. 엔티티의 `UNIQUE_FIELDS` 각각: `is_deleted: false`인 문서만 대상으로 하는 부분 unique 인덱스
    ///
    /// 소프트 삭제된 문서는 부분 인덱스에서 빠지므로 같은 값을 다시 사용할 수 있습니다.
    /// 동시 요청이 서비스 훅의 중복 검사를 함께 통과해도 두 번째 쓰기는 11000 에러(409)로 실패합니다.
    async fn create_indexes(&self) -> Result<(), AppError> {
        let mut specs = vec![
            (EntityMeta::CREATED_AT, -1, "created_at_desc".to_string()),
            (EntityMeta::IS_DELETED, 1, "is_deleted".to_string()),
        ];
        specs.extend(T::INDEXED_FIELDS.iter().map(|field| (*field, 1, format!("{}_asc", field))));

        let mut indexes: Vec<IndexModel> = specs
            .into_iter()
            .map(|(field, order, name)| {
                let mut keys = Document::new();
                keys.insert(field, order);
                IndexModel::builder()
                    .keys(keys)
                    .options(IndexOptions::builder().name(name).build())
                    .build()
            })
            .collect();

        indexes.extend(T::UNIQUE_FIELDS.iter().map(|field| {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            let mut active = Document::new();
            active.insert(EntityMeta::IS_DELETED, false);
            let options = IndexOptions::builder()
                .name(format!("{}_unique", field))
                .unique(true)
                .partial_filter_expression(active)
                .build();
            IndexModel::builder().keys(keys).options(options).build()
        }));

        self.collection.create_indexes(indexes).await?;

        info!("✅ {} 컬렉션 인덱스 생성 완료", T::COLLECTION);
        Ok(())
    }
}
