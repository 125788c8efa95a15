//! HTTP 핸들러가 엔티티 서비스에 접근하는 공통 계약

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;
use crate::domain::entities::Entity;
use super::crud_service::CrudService;

/// 제네릭 CRUD 핸들러에 연결할 수 있는 엔티티 서비스
///
/// 요청 DTO 타입과 베이스 서비스만 노출하면 `handlers::crud`의
/// 핸들러 8종을 그대로 사용할 수 있습니다.
///
/// ```rust,ignore
/// impl CrudResource for ProductService {
///     type Entity = Product;
///     type CreateRequest = CreateProductRequest;
///     type UpdateRequest = UpdateProductRequest;
///
///     fn crud(&self) -> &CrudService<Product> {
///         &self.crud
///     }
/// }
/// ```
pub trait CrudResource: Send + Sync + 'static {
    type Entity: Entity;
    /// 생성 요청 본문. 검증 후 엔티티로 변환됩니다.
    type CreateRequest: DeserializeOwned + Validate + Into<Self::Entity> + 'static;
    /// 부분 수정 요청 본문. 값이 있는 필드만 직렬화되어야 합니다.
    type UpdateRequest: DeserializeOwned + Validate + Serialize + 'static;

    fn crud(&self) -> &CrudService<Self::Entity>;
}
