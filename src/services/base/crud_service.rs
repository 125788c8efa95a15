//! # 제네릭 CRUD 베이스 서비스
//!
//! 엔티티 `T`에 대한 생성/조회/수정/삭제/소프트 삭제/복구/검색을 제공합니다.
//! 모든 변경 연산은 같은 순서를 따릅니다.
//!
//! ```text
//! ID 형식 검증 → before 훅 → 저장소 호출 1회 → after 훅
//!     → 캐시 무효화 → 이벤트 발행 → 감사 로그 기록
//! ```
//!
//! ## 에러 정책
//!
//! - 입력 검증 오류(400), 리소스 없음(404), 유일 값 충돌(409)은 그대로 전달
//! - 그 외 모든 에러는 원인을 `error!`로 남긴 뒤 `Internal Server Error`로 교체
//! - 캐시 조회/저장/무효화 실패와 감사 로그 실패는 `warn!`만 남기고 무시
//!
//! ## 캐시 정책
//!
//! | 대상 | 키 | 무효화 시점 |
//! |------|----|-------------|
//! | 단건 | `{prefix}:{entity}:{id}` | 해당 문서 수정/삭제/소프트 삭제/복구 |
//! | 목록/검색 | `{prefix}:{entity}:list:{sha256}` | 모든 변경 연산 |

use std::sync::Arc;
use log::{debug, error, info, warn};
use mongodb::bson::{Bson, DateTime, Document};
use serde::{de::DeserializeOwned, Serialize};
use crate::{
    audit::{AuditAction, AuditEntry, AuditLogger},
    caching::{CacheKeys, CacheStore},
    config::{CacheConfig, PaginationConfig},
    domain::dto::common::{ListParams, PaginatedResponse, SearchParams},
    domain::entities::{Entity, EntityMeta},
    errors::errors::{AppError, AppResult},
    events::{actions, EntityEvent, EventEmitter},
    repositories::{document_store::actor_bson, DocumentStore, ListQuery},
    utils::string_utils::{is_valid_field_name, parse_object_id},
};
use super::hooks::{CrudHooks, NoopHooks};

/// 엔티티 `T`에 대한 CRUD 베이스 서비스
///
/// 협력 객체는 모두 trait 객체로 주입되므로, 실행 환경에 따라
/// MongoDB/Redis 구현이나 메모리 구현을 자유롭게 조합할 수 있습니다.
///
/// ```rust,ignore
/// let service = CrudService::<Product>::new(
///     Arc::new(MongoRepository::new(&db)),
///     Arc::new(RedisClient::new().await?),
///     Arc::new(MongoAuditLogger::new(&db)),
///     emitter.clone(),
/// )
/// .with_hooks(Arc::new(ProductHooks::new(store)));
///
/// let created = service.create(product, actor.user_id()).await?;
/// ```
pub struct CrudService<T: Entity> {
    store: Arc<dyn DocumentStore<T>>,
    cache: Arc<dyn CacheStore>,
    audit: Arc<dyn AuditLogger>,
    events: Arc<dyn EventEmitter>,
    hooks: Arc<dyn CrudHooks<T>>,
    keys: CacheKeys,
    cache_ttl: u64,
    default_limit: u64,
    max_limit: u64,
}

impl<T: Entity> CrudService<T> {
    /// 환경 설정(`CACHE_*`, `PAGINATION_*`)을 읽어 서비스를 생성합니다.
    /// 훅은 [`NoopHooks`]로 시작합니다.
    pub fn new(
        store: Arc<dyn DocumentStore<T>>,
        cache: Arc<dyn CacheStore>,
        audit: Arc<dyn AuditLogger>,
        events: Arc<dyn EventEmitter>,
    ) -> Self {
        Self {
            store,
            cache,
            audit,
            events,
            hooks: Arc::new(NoopHooks),
            keys: CacheKeys::new(&CacheConfig::key_prefix(), T::NAME),
            cache_ttl: CacheConfig::ttl_seconds(),
            default_limit: PaginationConfig::default_limit(),
            max_limit: PaginationConfig::max_limit(),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn CrudHooks<T>>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl = seconds;
        self
    }

    pub fn with_page_limits(mut self, default_limit: u64, max_limit: u64) -> Self {
        self.max_limit = max_limit.max(1);
        self.default_limit = default_limit.clamp(1, self.max_limit);
        self
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore<T>> {
        &self.store
    }

    pub fn cache_keys(&self) -> &CacheKeys {
        &self.keys
    }

    // ===== 공개 연산 =====

    /// 새 문서를 생성합니다.
    ///
    /// `created_by`/`updated_by`는 `actor`로 채워지고 삭제 관련 필드는 초기화됩니다.
    pub async fn create(&self, entity: T, actor: Option<&str>) -> AppResult<T> {
        let result = self.create_inner(entity, actor).await;
        self.sanitize("create", result)
    }

    /// 삭제되지 않은 문서를 페이지 단위로 조회합니다.
    pub async fn find_all(&self, params: &ListParams) -> AppResult<PaginatedResponse<T>> {
        self.find_all_where(params, Document::new()).await
    }

    /// 동등 비교 조건을 추가한 목록 조회 (엔티티별 서비스용)
    pub async fn find_all_where(
        &self,
        params: &ListParams,
        filter: Document,
    ) -> AppResult<PaginatedResponse<T>> {
        let result = self.find_all_inner(params, filter).await;
        self.sanitize("find_all", result)
    }

    pub async fn find_one(&self, id: &str) -> AppResult<T> {
        let result = self.find_one_inner(id).await;
        self.sanitize("find_one", result)
    }

    /// 부분 수정
    ///
    /// `_id`와 관리 필드는 변경 문서에서 제거됩니다.
    /// 제거 후 남는 필드가 없으면 400 에러입니다.
    pub async fn update(&self, id: &str, changes: Document, actor: Option<&str>) -> AppResult<T> {
        let result = self.update_inner(id, changes, actor).await;
        self.sanitize("update", result)
    }

    /// 문서를 영구 삭제하고 삭제된 문서를 반환합니다.
    pub async fn remove(&self, id: &str, actor: Option<&str>) -> AppResult<T> {
        let result = self.remove_inner(id, actor).await;
        self.sanitize("remove", result)
    }

    /// 삭제 표시만 남기는 소프트 삭제
    ///
    /// 이미 소프트 삭제된 문서는 404입니다.
    pub async fn soft_remove(&self, id: &str, actor: Option<&str>) -> AppResult<T> {
        let result = self.soft_remove_inner(id, actor).await;
        self.sanitize("soft_remove", result)
    }

    /// 소프트 삭제된 문서를 되살립니다.
    pub async fn restore(&self, id: &str, actor: Option<&str>) -> AppResult<T> {
        let result = self.restore_inner(id, actor).await;
        self.sanitize("restore", result)
    }

    /// 엔티티의 검색 필드 전체에 대한 부분 일치 검색
    pub async fn search(&self, params: &SearchParams) -> AppResult<PaginatedResponse<T>> {
        let result = self.search_inner(params).await;
        self.sanitize("search", result)
    }

    /// 조건에 맞는 삭제되지 않은 첫 문서 (캐시하지 않음)
    pub async fn find_one_by(&self, filter: Document) -> AppResult<Option<T>> {
        let result = self.store.find_one(filter).await;
        self.sanitize("find_one_by", result)
    }

    /// 조건에 맞는 삭제되지 않은 문서 수
    pub async fn count(&self, filter: Document) -> AppResult<u64> {
        let result = self.store.count(filter, false).await;
        self.sanitize("count", result)
    }

    // ===== 연산 본문 =====

    async fn create_inner(&self, mut entity: T, actor: Option<&str>) -> AppResult<T> {
        debug!("[{}] create by {:?}", T::NAME, actor);

        entity.meta_mut().stamp_created(actor, DateTime::now());
        self.hooks.before_create(&mut entity).await?;

        let saved = self.store.insert(entity).await?;
        if let Err(e) = self.hooks.after_create(&saved).await {
            return self.after_hook_failed(None, e).await;
        }

        let id = saved.id_string().unwrap_or_default();
        self.invalidate(None).await;
        self.emit(actions::CREATED, &id, actor, &saved);
        self.record(AuditAction::Create, &id, actor, None).await;

        info!("[{}] 생성 완료: {}", T::NAME, id);
        Ok(saved)
    }

    async fn find_all_inner(&self, params: &ListParams, filter: Document) -> AppResult<PaginatedResponse<T>> {
        let query = self.list_query(params)?.with_filter(filter);
        let key = self.keys.list(&query.fingerprint());

        if let Some(cached) = self.cache_get::<PaginatedResponse<T>>(&key).await {
            return Ok(cached);
        }

        let items = self.store.find_page(&query).await?;
        let total = self.store.count(query.filter.clone(), query.include_deleted).await?;
        let page = PaginatedResponse::new(items, total, query.page, query.limit);

        self.cache_set(&key, &page).await;
        Ok(page)
    }

    async fn find_one_inner(&self, id: &str) -> AppResult<T> {
        let object_id = parse_object_id(id)?;
        let key = self.keys.record(&object_id.to_hex());

        if let Some(cached) = self.cache_get::<T>(&key).await {
            return Ok(cached);
        }

        let entity = self
            .store
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        self.cache_set(&key, &entity).await;
        Ok(entity)
    }

    async fn update_inner(&self, id: &str, mut changes: Document, actor: Option<&str>) -> AppResult<T> {
        let object_id = parse_object_id(id)?;
        debug!("[{}] update {} by {:?}", T::NAME, object_id, actor);

        for field in EntityMeta::PROTECTED_FIELDS {
            changes.remove(field);
        }
        if changes.is_empty() {
            return Err(AppError::ValidationError("변경할 필드가 없습니다".to_string()));
        }

        self.hooks.before_update(&object_id, &mut changes).await?;
        let audited_changes = Bson::Document(changes.clone()).into_relaxed_extjson();

        changes.insert(EntityMeta::UPDATED_BY, actor_bson(actor));
        changes.insert(EntityMeta::UPDATED_AT, DateTime::now());

        let updated = self
            .store
            .update_by_id(object_id, changes)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        let id = object_id.to_hex();
        if let Err(e) = self.hooks.after_update(&updated).await {
            return self.after_hook_failed(Some(&id), e).await;
        }

        self.invalidate(Some(&id)).await;
        self.emit(actions::UPDATED, &id, actor, &updated);
        self.record(AuditAction::Update, &id, actor, Some(audited_changes)).await;

        info!("[{}] 수정 완료: {}", T::NAME, id);
        Ok(updated)
    }

    async fn remove_inner(&self, id: &str, actor: Option<&str>) -> AppResult<T> {
        let object_id = parse_object_id(id)?;
        debug!("[{}] remove {} by {:?}", T::NAME, object_id, actor);

        self.hooks.before_remove(&object_id).await?;
        let removed = self
            .store
            .delete_by_id(object_id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        let id = object_id.to_hex();
        if let Err(e) = self.hooks.after_remove(&removed).await {
            return self.after_hook_failed(Some(&id), e).await;
        }

        self.invalidate(Some(&id)).await;
        self.emit(actions::REMOVED, &id, actor, &removed);
        self.record(AuditAction::Remove, &id, actor, None).await;

        info!("[{}] 삭제 완료: {}", T::NAME, id);
        Ok(removed)
    }

    async fn soft_remove_inner(&self, id: &str, actor: Option<&str>) -> AppResult<T> {
        let object_id = parse_object_id(id)?;
        debug!("[{}] soft_remove {} by {:?}", T::NAME, object_id, actor);

        self.hooks.before_soft_remove(&object_id).await?;
        let deleted = self
            .store
            .mark_deleted(object_id, actor, DateTime::now())
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        let id = object_id.to_hex();
        if let Err(e) = self.hooks.after_soft_remove(&deleted).await {
            return self.after_hook_failed(Some(&id), e).await;
        }

        self.invalidate(Some(&id)).await;
        self.emit(actions::SOFT_REMOVED, &id, actor, &deleted);
        self.record(AuditAction::SoftRemove, &id, actor, None).await;

        info!("[{}] 소프트 삭제 완료: {}", T::NAME, id);
        Ok(deleted)
    }

    async fn restore_inner(&self, id: &str, actor: Option<&str>) -> AppResult<T> {
        let object_id = parse_object_id(id)?;
        debug!("[{}] restore {} by {:?}", T::NAME, object_id, actor);

        let restored = self
            .store
            .restore(object_id, actor, DateTime::now())
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        let id = object_id.to_hex();
        self.invalidate(Some(&id)).await;
        self.emit(actions::RESTORED, &id, actor, &restored);
        self.record(AuditAction::Restore, &id, actor, None).await;

        info!("[{}] 복구 완료: {}", T::NAME, id);
        Ok(restored)
    }

    async fn search_inner(&self, params: &SearchParams) -> AppResult<PaginatedResponse<T>> {
        let term = params
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::ValidationError("검색어(q)는 필수입니다".to_string()))?;

        let query = self.list_query(&params.list_params())?;
        let key = self.keys.list(&format!("search={}&{}", term, query.fingerprint()));

        if let Some(cached) = self.cache_get::<PaginatedResponse<T>>(&key).await {
            return Ok(cached);
        }

        let (items, total) = self.store.search(term, &query).await?;
        let page = PaginatedResponse::new(items, total, query.page, query.limit);

        self.cache_set(&key, &page).await;
        Ok(page)
    }

    // ===== 내부 도우미 =====

    /// 요청 파라미터를 저장소 조회 조건으로 변환합니다.
    ///
    /// 페이지 크기는 `1..=max_limit`로 보정됩니다. 페이지는 1 이상이며,
    /// 건너뛸 문서 수가 MongoDB의 `i64` 범위를 넘지 않도록 상한이 있습니다.
    fn list_query(&self, params: &ListParams) -> AppResult<ListQuery> {
        let limit = params.limit.unwrap_or(self.default_limit).clamp(1, self.max_limit);
        let max_page = i64::MAX as u64 / limit + 1;
        let page = params.page.unwrap_or(1).clamp(1, max_page);
        let mut query = ListQuery::new(page, limit);

        if let Some(field) = params.sort_by.as_deref() {
            if !is_valid_field_name(field) {
                return Err(AppError::ValidationError(format!("정렬할 수 없는 필드입니다: {}", field)));
            }
            query = query.sorted_by(field, params.sort_order.unwrap_or_default());
        } else if let Some(order) = params.sort_order {
            query = query.sorted_by(EntityMeta::CREATED_AT, order);
        }

        Ok(query)
    }

    fn not_found(id: &str) -> AppError {
        AppError::NotFound(format!("{}을(를) 찾을 수 없습니다: {}", T::NAME, id))
    }

    /// 클라이언트 에러는 그대로, 나머지는 원인을 로그에 남기고 일반 내부 에러로 교체
    fn sanitize<R>(&self, operation: &str, result: AppResult<R>) -> AppResult<R> {
        result.map_err(|e| {
            if e.is_client_error() {
                e
            } else {
                error!("[{}] {} 실패: {}", T::NAME, operation, e);
                AppError::internal()
            }
        })
    }

    async fn cache_get<R: DeserializeOwned>(&self, key: &str) -> Option<R> {
        match self.cache.get_raw(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!("캐시 적중: {}", key);
                    Some(value)
                }
                Err(e) => {
                    warn!("캐시 값 역직렬화 실패 ({}): {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("캐시 조회 실패 ({}): {}", key, e);
                None
            }
        }
    }

    async fn cache_set<R: Serialize>(&self, key: &str, value: &R) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("캐시 값 직렬화 실패 ({}): {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set_raw(key, raw, self.cache_ttl).await {
            warn!("캐시 저장 실패 ({}): {}", key, e);
        }
    }

    /// `after_*` 훅 실패 처리
    ///
    /// 저장소 변경은 이미 반영되었으므로 캐시를 비운 뒤 에러를 전달합니다.
    /// 이벤트와 감사 로그는 남기지 않습니다.
    async fn after_hook_failed<R>(&self, id: Option<&str>, error: AppError) -> AppResult<R> {
        self.invalidate(id).await;
        Err(error)
    }

    /// 단건 키(있으면)와 모든 목록 키를 무효화합니다.
    async fn invalidate(&self, id: Option<&str>) {
        if let Some(id) = id {
            let key = self.keys.record(id);
            if let Err(e) = self.cache.delete(&key).await {
                warn!("캐시 무효화 실패 ({}): {}", key, e);
            }
        }

        let pattern = self.keys.list_pattern();
        if let Err(e) = self.cache.delete_pattern(&pattern).await {
            warn!("캐시 무효화 실패 ({}): {}", pattern, e);
        }
    }

    fn emit(&self, action: &str, id: &str, actor: Option<&str>, entity: &T) {
        let payload = serde_json::to_value(T::Response::from(entity.clone()))
            .unwrap_or(serde_json::Value::Null);
        self.events.emit(EntityEvent::new(T::NAME, action, id, actor, payload));
    }

    /// 감사 로그 기록 (실패는 무시)
    async fn record(
        &self,
        action: AuditAction,
        id: &str,
        actor: Option<&str>,
        changes: Option<serde_json::Value>,
    ) {
        let mut entry = AuditEntry::new(action, T::NAME, id, actor);
        if let Some(changes) = changes {
            entry = entry.with_changes(changes);
        }

        if let Err(e) = self.audit.record(entry).await {
            warn!("[{}] 감사 로그 기록 실패 ({} {}): {}", T::NAME, action, id, e);
        }
    }
}
