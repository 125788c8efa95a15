//! 메모리 문서 저장소
//!
//! 프로세스 내부의 BSON 문서 목록에 대한 [`DocumentStore`] 구현입니다.
//! MongoDB 구현과 같은 필터/정렬/소프트 삭제/유일 필드 규칙을 따르며,
//! 테스트와 `STORE_BACKEND=memory` 실행 모드에서 사용됩니다.

use std::cmp::Ordering;
use std::marker::PhantomData;
use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson, DateTime, Document};
use tokio::sync::RwLock;
use crate::domain::dto::common::SortOrder;
use crate::domain::entities::{Entity, EntityMeta};
use crate::errors::errors::{AppError, ErrorContext};
use super::document_store::{actor_bson, DocumentStore, ListQuery};

pub struct MemoryRepository<T: Entity> {
    documents: RwLock<Vec<Document>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
            _entity: PhantomData,
        }
    }

    /// 저장된 문서 수 (삭제 표시된 문서 포함)
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn decode(document: &Document) -> Result<T, AppError> {
        bson::from_document::<T>(document.clone())
            .with_context(|| format!("{} 문서 디코딩 실패", T::COLLECTION))
    }

    /// 삭제되지 않은 다른 문서가 `candidate`의 유일 필드 값을 쓰고 있으면 409 에러
    ///
    /// MongoDB의 부분 unique 인덱스(`is_deleted: false`)와 같은 규칙입니다.
    fn ensure_unique(documents: &[Document], candidate: &Document, except: Option<&ObjectId>) -> Result<(), AppError> {
        for field in T::UNIQUE_FIELDS {
            let Some(value) = candidate.get(*field).filter(|v| !matches!(v, Bson::Null)) else {
                continue;
            };

            let taken = documents.iter().any(|d| {
                !is_deleted(d) && except.is_none_or(|id| !has_id(d, id)) && d.get(*field) == Some(value)
            });
            if taken {
                return Err(AppError::ConflictError(format!("이미 사용 중인 {} 값입니다: {}", field, value)));
            }
        }
        Ok(())
    }

    /// 조건에 맞는 문서를 정렬한 뒤 현재 페이지만 디코딩합니다.
    fn select<F>(documents: &[Document], query: &ListQuery, predicate: F) -> Result<(Vec<T>, u64), AppError>
    where
        F: Fn(&Document) -> bool,
    {
        let mut matched: Vec<&Document> = documents
            .iter()
            .filter(|d| query.include_deleted || !is_deleted(d))
            .filter(|d| matches_filter(d, &query.filter))
            .filter(|d| predicate(d))
            .collect();

        matched.sort_by(|a, b| {
            let ordering = compare_values(a.get(&query.sort_by), b.get(&query.sort_by))
                .then_with(|| compare_values(a.get("_id"), b.get("_id")));
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(query.skip() as usize)
            .take(query.limit as usize)
            .map(Self::decode)
            .collect::<Result<Vec<T>, AppError>>()?;

        Ok((items, total))
    }
}

fn is_deleted(document: &Document) -> bool {
    matches!(document.get(EntityMeta::IS_DELETED), Some(Bson::Boolean(true)))
}

fn has_id(document: &Document, id: &ObjectId) -> bool {
    matches!(document.get("_id"), Some(Bson::ObjectId(doc_id)) if doc_id == id)
}

/// 최상위 필드 동등 비교
fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, value)| document.get(key) == Some(value))
}

fn matches_term(document: &Document, fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|field| {
        matches!(document.get(*field), Some(Bson::String(value)) if value.to_lowercase().contains(needle))
    })
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// 정렬용 BSON 값 비교. 없는 값과 Null은 가장 앞에 옵니다.
fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let a = a.filter(|v| !matches!(v, Bson::Null));
    let b = b.filter(|v| !matches!(v, Bson::Null));

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
                return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            }
            match (a, b) {
                (Bson::String(x), Bson::String(y)) => x.cmp(y),
                (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
                (Bson::ObjectId(x), Bson::ObjectId(y)) => x.cmp(y),
                (Bson::DateTime(x), Bson::DateTime(y)) => x.cmp(y),
                _ => Ordering::Equal,
            }
        }
    }
}

#[async_trait]
impl<T: Entity> DocumentStore<T> for MemoryRepository<T> {
    async fn insert(&self, mut entity: T) -> Result<T, AppError> {
        entity.set_id(ObjectId::new());
        let document = bson::to_document(&entity)?;

        let mut documents = self.documents.write().await;
        Self::ensure_unique(&documents, &document, None)?;
        documents.push(document);
        Ok(entity)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .find(|d| has_id(d, &id) && !is_deleted(d))
            .map(Self::decode)
            .transpose()
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>, AppError> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .find(|d| !is_deleted(d) && matches_filter(d, &filter))
            .map(Self::decode)
            .transpose()
    }

    async fn find_page(&self, query: &ListQuery) -> Result<Vec<T>, AppError> {
        let documents = self.documents.read().await;
        let (items, _) = Self::select(&documents, query, |_| true)?;
        Ok(items)
    }

    async fn count(&self, filter: Document, include_deleted: bool) -> Result<u64, AppError> {
        let documents = self.documents.read().await;
        let total = documents
            .iter()
            .filter(|d| include_deleted || !is_deleted(d))
            .filter(|d| matches_filter(d, &filter))
            .count();
        Ok(total as u64)
    }

    async fn search(&self, term: &str, query: &ListQuery) -> Result<(Vec<T>, u64), AppError> {
        let needle = term.to_lowercase();
        let documents = self.documents.read().await;
        Self::select(&documents, query, |d| matches_term(d, T::SEARCH_FIELDS, &needle))
    }

    async fn update_by_id(&self, id: ObjectId, changes: Document) -> Result<Option<T>, AppError> {
        let mut documents = self.documents.write().await;
        let Some(index) = documents.iter().position(|d| has_id(d, &id) && !is_deleted(d)) else {
            return Ok(None);
        };

        let mut updated = documents[index].clone();
        for (key, value) in changes {
            updated.insert(key, value);
        }
        Self::ensure_unique(&documents, &updated, Some(&id))?;

        let entity = Self::decode(&updated)?;
        documents[index] = updated;
        Ok(Some(entity))
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        let mut documents = self.documents.write().await;
        match documents.iter().position(|d| has_id(d, &id)) {
            Some(index) => Self::decode(&documents.remove(index)).map(Some),
            None => Ok(None),
        }
    }

    async fn mark_deleted(
        &self,
        id: ObjectId,
        actor: Option<&str>,
        at: DateTime,
    ) -> Result<Option<T>, AppError> {
        let mut documents = self.documents.write().await;
        let Some(document) = documents.iter_mut().find(|d| has_id(d, &id) && !is_deleted(d)) else {
            return Ok(None);
        };

        document.insert(EntityMeta::IS_DELETED, true);
        document.insert(EntityMeta::DELETED_BY, actor_bson(actor));
        document.insert(EntityMeta::DELETED_AT, at);
        document.insert(EntityMeta::UPDATED_BY, actor_bson(actor));
        document.insert(EntityMeta::UPDATED_AT, at);
        Self::decode(document).map(Some)
    }

    async fn restore(
        &self,
        id: ObjectId,
        actor: Option<&str>,
        at: DateTime,
    ) -> Result<Option<T>, AppError> {
        let mut documents = self.documents.write().await;
        let Some(index) = documents.iter().position(|d| has_id(d, &id) && is_deleted(d)) else {
            return Ok(None);
        };
        Self::ensure_unique(&documents, &documents[index], Some(&id))?;

        let document = &mut documents[index];
        document.insert(EntityMeta::IS_DELETED, false);
        document.insert(EntityMeta::UPDATED_BY, actor_bson(actor));
        document.insert(EntityMeta::UPDATED_AT, at);
        document.remove(EntityMeta::DELETED_BY);
        document.remove(EntityMeta::DELETED_AT);
        Self::decode(document).map(Some)
    }

    async fn create_indexes(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use crate::domain::entities::Product;

    fn product(name: &str, sku: &str, price: f64) -> Product {
        Product::new(name.to_string(), sku.to_string(), price)
    }

    async fn seeded() -> (MemoryRepository<Product>, Vec<Product>) {
        let repo = MemoryRepository::<Product>::new();
        let mut saved = Vec::new();
        for (name, sku, price) in [
            ("Mechanical Keyboard", "KB-1", 120.0),
            ("Wireless Mouse", "MS-1", 40.0),
            ("USB Hub", "HUB-1", 25.0),
        ] {
            saved.push(repo.insert(product(name, sku, price)).await.unwrap());
        }
        (repo, saved)
    }

    #[actix_web::test]
    async fn test_insert_assigns_id_and_find_by_id() {
        let (repo, saved) = seeded().await;
        let id = saved[0].id.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.sku, "KB-1");
        assert!(repo.find_by_id(ObjectId::new()).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_find_page_sorts_and_paginates() {
        let (repo, _) = seeded().await;

        let query = ListQuery::new(1, 2).sorted_by("price", SortOrder::Asc);
        let first = repo.find_page(&query).await.unwrap();
        assert_eq!(first.iter().map(|p| p.sku.as_str()).collect::<Vec<_>>(), vec!["HUB-1", "MS-1"]);

        let query = ListQuery::new(2, 2).sorted_by("price", SortOrder::Asc);
        let second = repo.find_page(&query).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].sku, "KB-1");
    }

    #[actix_web::test]
    async fn test_default_sort_orders_by_time_not_text() {
        let repo = MemoryRepository::<Product>::new();
        // 초 단위 시각과 밀리초가 붙은 시각이 섞인 경우
        for (sku, millis) in [("B", 1_700_000_404_500_i64), ("A", 1_700_000_405_000), ("C", 1_700_000_405_500)] {
            let mut item = product(sku, sku, 1.0);
            item.meta.stamp_created(None, DateTime::from_millis(millis));
            repo.insert(item).await.unwrap();
        }

        let newest_first = repo.find_page(&ListQuery::new(1, 10)).await.unwrap();
        let skus: Vec<&str> = newest_first.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["C", "A", "B"]);

        let query = ListQuery::new(1, 10).sorted_by(EntityMeta::CREATED_AT, SortOrder::Asc);
        let oldest_first = repo.find_page(&query).await.unwrap();
        let skus: Vec<&str> = oldest_first.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["B", "A", "C"]);
    }

    #[actix_web::test]
    async fn test_unique_fields_apply_to_active_documents_only() {
        let (repo, saved) = seeded().await;

        let duplicate = repo.insert(product("Another Keyboard", "KB-1", 10.0)).await;
        assert!(matches!(duplicate, Err(AppError::ConflictError(_))));
        assert_eq!(repo.len().await, 3);

        let mouse_id = saved[1].id.unwrap();
        let result = repo.update_by_id(mouse_id, doc! { "sku": "KB-1" }).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(repo.find_by_id(mouse_id).await.unwrap().unwrap().sku, "MS-1");

        // 소프트 삭제된 문서의 값은 다시 쓸 수 있지만, 복구는 충돌
        let keyboard_id = saved[0].id.unwrap();
        repo.mark_deleted(keyboard_id, None, DateTime::now()).await.unwrap();
        repo.insert(product("Replacement", "KB-1", 99.0)).await.unwrap();
        let result = repo.restore(keyboard_id, None, DateTime::now()).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_soft_deleted_documents_are_hidden() {
        let (repo, saved) = seeded().await;
        let id = saved[1].id.unwrap();

        let deleted = repo.mark_deleted(id, Some("admin"), DateTime::now()).await.unwrap().unwrap();
        assert!(deleted.meta.is_deleted);
        assert!(deleted.meta.deleted_at.is_some());
        assert_eq!(deleted.meta.deleted_by.as_deref(), Some("admin"));

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert_eq!(repo.count(Document::new(), false).await.unwrap(), 2);
        assert_eq!(repo.count(Document::new(), true).await.unwrap(), 3);

        // 이미 삭제된 문서는 다시 삭제 표시되지 않음
        assert!(repo.mark_deleted(id, None, DateTime::now()).await.unwrap().is_none());
        // 삭제된 문서는 수정할 수 없음
        assert!(repo.update_by_id(id, doc! { "price": 1.0 }).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_restore_clears_deletion_fields() {
        let (repo, saved) = seeded().await;
        let id = saved[0].id.unwrap();

        assert!(repo.restore(id, None, DateTime::now()).await.unwrap().is_none());

        repo.mark_deleted(id, Some("admin"), DateTime::now()).await.unwrap();
        let restored = repo.restore(id, Some("admin"), DateTime::now()).await.unwrap().unwrap();

        assert!(!restored.meta.is_deleted);
        assert!(restored.meta.deleted_by.is_none());
        assert!(restored.meta.deleted_at.is_none());
        assert!(repo.find_by_id(id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_search_is_case_insensitive_across_fields() {
        let (repo, _) = seeded().await;
        let query = ListQuery::new(1, 10);

        let (items, total) = repo.search("mouse", &query).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].sku, "MS-1");

        let (_, total) = repo.search("hub-1", &query).await.unwrap();
        assert_eq!(total, 1);

        let (items, total) = repo.search("nothing", &query).await.unwrap();
        assert_eq!(total, 0);
        assert!(items.is_empty());
    }

    #[actix_web::test]
    async fn test_update_and_delete_return_documents() {
        let (repo, saved) = seeded().await;
        let id = saved[2].id.unwrap();

        let updated = repo.update_by_id(id, doc! { "price": 30.0, "stock": 5_i64 }).await.unwrap().unwrap();
        assert_eq!(updated.price, 30.0);
        assert_eq!(updated.stock, 5);

        let removed = repo.delete_by_id(id).await.unwrap().unwrap();
        assert_eq!(removed.sku, "HUB-1");
        assert!(repo.delete_by_id(id).await.unwrap().is_none());
        assert_eq!(repo.len().await, 2);
    }

    #[actix_web::test]
    async fn test_find_one_with_filter() {
        let (repo, _) = seeded().await;

        let found = repo.find_one(doc! { "sku": "MS-1" }).await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Wireless Mouse".to_string()));
        assert!(repo.find_one(doc! { "sku": "NOPE" }).await.unwrap().is_none());
    }
}
