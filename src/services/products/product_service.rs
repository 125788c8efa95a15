//! # 상품 서비스
//!
//! `CrudService<Product>` 위에 상품 고유 규칙을 얹은 싱글톤 서비스입니다.
//!
//! ## 비즈니스 규칙
//!
//! - SKU는 앞뒤 공백 제거 후 대문자로 저장
//! - SKU는 삭제되지 않은 상품 사이에서 유일 (중복 시 409)
//! - 가격과 재고는 0 이상
//!
//! 규칙은 [`ProductHooks`]로 구현되어 베이스 서비스의 `before_*` 단계에서 실행됩니다.

use std::any::Any;
use std::sync::Arc;
use async_trait::async_trait;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use once_cell::sync::OnceCell;
use crate::{
    core::{registry::ServiceLocator, Infrastructure},
    domain::{
        dto::{
            common::{ListParams, PaginatedResponse},
            products::{CreateProductRequest, UpdateProductRequest},
        },
        entities::Product,
    },
    errors::errors::{AppError, AppResult},
    repositories::DocumentStore,
    services::base::{ensure_non_negative, CrudHooks, CrudResource, CrudService},
    utils::string_utils::{clean_optional_string, validate_required_string},
};

/// 상품 관리 서비스
pub struct ProductService {
    crud: CrudService<Product>,
}

/// 싱글톤 인스턴스 저장소
static PRODUCT_SERVICE_INSTANCE: OnceCell<Arc<ProductService>> = OnceCell::new();

impl ProductService {
    /// 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 첫 호출 시 `ServiceLocator`에 등록된 [`Infrastructure`]로 인스턴스를 만듭니다.
    pub fn instance() -> Arc<Self> {
        PRODUCT_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new()))
            .clone()
    }

    fn new() -> Self {
        let infrastructure = ServiceLocator::get::<Infrastructure>();
        Self::with_infrastructure(&infrastructure)
    }

    /// 주어진 인프라로 독립 인스턴스를 만듭니다 (테스트, 임베딩용).
    pub fn with_infrastructure(infrastructure: &Infrastructure) -> Self {
        let store = infrastructure.store::<Product>();
        let crud = CrudService::new(
            store.clone(),
            infrastructure.cache.clone(),
            infrastructure.audit.clone(),
            infrastructure.events.clone(),
        )
        .with_hooks(Arc::new(ProductHooks::new(store)));

        Self { crud }
    }

    /// SKU로 상품을 조회합니다. 대소문자는 구분하지 않습니다.
    pub async fn find_by_sku(&self, sku: &str) -> AppResult<Product> {
        let sku = normalize_sku(sku)?;
        debug!("SKU 조회: {}", sku);

        self.crud
            .find_one_by(doc! { "sku": &sku })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("SKU {}인 상품을 찾을 수 없습니다", sku)))
    }

    /// 카테고리별 상품 목록
    pub async fn find_by_category(
        &self,
        category: &str,
        params: &ListParams,
    ) -> AppResult<PaginatedResponse<Product>> {
        let category = validate_required_string(category, "category")?;
        self.crud.find_all_where(params, doc! { "category": category }).await
    }
}

impl CrudResource for ProductService {
    type Entity = Product;
    type CreateRequest = CreateProductRequest;
    type UpdateRequest = UpdateProductRequest;

    fn crud(&self) -> &CrudService<Product> {
        &self.crud
    }
}

fn normalize_sku(sku: &str) -> AppResult<String> {
    Ok(validate_required_string(sku, "sku")?.to_uppercase())
}

/// 상품 라이프사이클 훅
pub struct ProductHooks {
    store: Arc<dyn DocumentStore<Product>>,
}

impl ProductHooks {
    pub fn new(store: Arc<dyn DocumentStore<Product>>) -> Self {
        Self { store }
    }

    /// 같은 SKU를 가진 다른 상품이 있으면 409
    ///
    /// 저장소의 유일 규칙(부분 unique 인덱스)보다 먼저 확인해 메시지를 구체적으로 만듭니다.
    async fn ensure_unique_sku(&self, sku: &str, except: Option<&ObjectId>) -> Result<(), AppError> {
        if let Some(existing) = self.store.find_one(doc! { "sku": sku }).await? {
            if existing.id.as_ref() != except {
                return Err(AppError::ConflictError(format!("이미 사용 중인 SKU입니다: {}", sku)));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CrudHooks<Product> for ProductHooks {
    async fn before_create(&self, product: &mut Product) -> Result<(), AppError> {
        product.name = validate_required_string(&product.name, "name")?;
        product.sku = normalize_sku(&product.sku)?;
        product.description = clean_optional_string(product.description.take());
        product.category = clean_optional_string(product.category.take());

        if product.price < 0.0 {
            return Err(AppError::ValidationError("price은(는) 0 이상이어야 합니다".to_string()));
        }
        if product.stock < 0 {
            return Err(AppError::ValidationError("stock은(는) 0 이상이어야 합니다".to_string()));
        }

        self.ensure_unique_sku(&product.sku, None).await
    }

    async fn before_update(&self, id: &ObjectId, changes: &mut Document) -> Result<(), AppError> {
        ensure_non_negative(changes, "price")?;
        ensure_non_negative(changes, "stock")?;

        if let Ok(name) = changes.get_str("name") {
            let name = validate_required_string(name, "name")?;
            changes.insert("name", name);
        }

        if let Some(sku) = changes.get("sku") {
            let sku = match sku {
                Bson::String(sku) => normalize_sku(sku)?,
                _ => return Err(AppError::ValidationError("sku은(는) 문자열이어야 합니다".to_string())),
            };
            self.ensure_unique_sku(&sku, Some(id)).await?;
            changes.insert("sku", sku);
        }

        Ok(())
    }
}

/// 서비스 레지스트리 생성자 함수
fn product_service_constructor() -> Arc<dyn Any + Send + Sync> {
    ProductService::instance()
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "product_service",
        constructor: product_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ProductService {
        ProductService::with_infrastructure(&Infrastructure::in_memory())
    }

    fn product(name: &str, sku: &str, price: f64) -> Product {
        Product::new(name.to_string(), sku.to_string(), price)
    }

    #[actix_web::test]
    async fn test_create_normalizes_fields() {
        let service = service();
        let mut input = product("  Keyboard  ", " kb-01 ", 49.0);
        input.category = Some("   ".to_string());

        let created = service.crud().create(input, None).await.unwrap();

        assert_eq!(created.name, "Keyboard");
        assert_eq!(created.sku, "KB-01");
        assert!(created.category.is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_sku_is_conflict() {
        let service = service();
        service.crud().create(product("Keyboard", "KB-01", 49.0), None).await.unwrap();

        let result = service.crud().create(product("Other", "kb-01", 10.0), None).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_negative_values_are_rejected() {
        let service = service();

        let result = service.crud().create(product("Broken", "BR-1", -1.0), None).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let created = service.crud().create(product("Ok", "OK-1", 1.0), None).await.unwrap();
        let id = created.id.unwrap().to_hex();
        let result = service.crud().update(&id, doc! { "stock": -5_i64 }, None).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_update_sku_checks_other_products() {
        let service = service();
        let first = service.crud().create(product("A", "A-1", 1.0), None).await.unwrap();
        service.crud().create(product("B", "B-1", 1.0), None).await.unwrap();
        let id = first.id.unwrap().to_hex();

        // 자기 자신의 SKU로 다시 저장하는 것은 허용
        let same = service.crud().update(&id, doc! { "sku": "a-1" }, None).await.unwrap();
        assert_eq!(same.sku, "A-1");

        let result = service.crud().update(&id, doc! { "sku": "b-1" }, None).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_concurrent_creates_with_same_sku_store_one() {
        let service = service();

        let (first, second) = futures_util::future::join(
            service.crud().create(product("Keyboard", "KB-01", 49.0), None),
            service.crud().create(product("Keyboard", "kb-01", 49.0), None),
        )
        .await;

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(AppError::ConflictError(_)))));
        assert_eq!(service.crud().count(Document::new()).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_restore_conflicts_when_sku_was_reused() {
        let service = service();
        let old = service.crud().create(product("Old", "RE-1", 1.0), None).await.unwrap();
        let old_id = old.id.unwrap().to_hex();

        service.crud().soft_remove(&old_id, None).await.unwrap();
        service.crud().create(product("New", "re-1", 2.0), None).await.unwrap();

        let result = service.crud().restore(&old_id, None).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(service.find_by_sku("RE-1").await.unwrap().name, "New");
    }

    #[actix_web::test]
    async fn test_find_by_sku_and_category() {
        let service = service();
        let mut mouse = product("Mouse", "MS-1", 20.0);
        mouse.category = Some("peripherals".to_string());
        service.crud().create(mouse, None).await.unwrap();
        service.crud().create(product("Desk", "DK-1", 300.0), None).await.unwrap();

        assert_eq!(service.find_by_sku("ms-1").await.unwrap().name, "Mouse");
        assert!(matches!(service.find_by_sku("none").await, Err(AppError::NotFound(_))));

        let page = service.find_by_category("peripherals", &ListParams::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].sku, "MS-1");
    }
}
