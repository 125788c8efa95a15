//! 베이스 서비스 라이프사이클 훅

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use crate::domain::entities::Entity;
use crate::errors::errors::AppError;

/// 변경 연산 전후에 호출되는 훅
///
/// 모든 메서드의 기본 구현은 아무것도 하지 않습니다.
/// `before_*` 훅이 에러를 반환하면 저장소 호출 없이 연산이 중단됩니다.
/// `after_*` 훅은 저장소 변경이 끝난 뒤 호출되므로, 에러를 반환해도
/// 이미 반영된 변경은 되돌려지지 않습니다. 관련 캐시는 무효화되고
/// 이벤트와 감사 로그는 남지 않습니다.
///
/// ```rust,ignore
/// struct ProductHooks;
///
/// #[async_trait]
/// impl CrudHooks<Product> for ProductHooks {
///     async fn before_create(&self, product: &mut Product) -> Result<(), AppError> {
///         product.sku = product.sku.trim().to_uppercase();
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait CrudHooks<T: Entity>: Send + Sync {
    /// 관리 필드가 채워진 뒤, 저장 직전에 호출됩니다.
    async fn before_create(&self, _entity: &mut T) -> Result<(), AppError> {
        Ok(())
    }

    async fn after_create(&self, _entity: &T) -> Result<(), AppError> {
        Ok(())
    }

    /// 보호 필드가 제거된 변경 문서를 받습니다.
    async fn before_update(&self, _id: &ObjectId, _changes: &mut Document) -> Result<(), AppError> {
        Ok(())
    }

    async fn after_update(&self, _entity: &T) -> Result<(), AppError> {
        Ok(())
    }

    async fn before_remove(&self, _id: &ObjectId) -> Result<(), AppError> {
        Ok(())
    }

    async fn after_remove(&self, _entity: &T) -> Result<(), AppError> {
        Ok(())
    }

    async fn before_soft_remove(&self, _id: &ObjectId) -> Result<(), AppError> {
        Ok(())
    }

    async fn after_soft_remove(&self, _entity: &T) -> Result<(), AppError> {
        Ok(())
    }
}

/// 아무 동작도 하지 않는 기본 훅
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl<T: Entity> CrudHooks<T> for NoopHooks {}

/// 변경 문서의 숫자 필드가 0 이상인지 확인합니다.
///
/// 필드가 없으면 통과합니다. 숫자가 아닌 값은 400 에러입니다.
pub fn ensure_non_negative(changes: &Document, field: &str) -> Result<(), AppError> {
    let value = match changes.get(field) {
        None => return Ok(()),
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => f64::from(*v),
        Some(Bson::Int64(v)) => *v as f64,
        Some(_) => {
            return Err(AppError::ValidationError(format!("{}은(는) 숫자여야 합니다", field)));
        }
    };

    if value < 0.0 {
        return Err(AppError::ValidationError(format!("{}은(는) 0 이상이어야 합니다", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_ensure_non_negative() {
        let changes = doc! { "price": 10.5, "stock": -1_i64, "salary": 0_i32, "name": "x" };

        assert!(ensure_non_negative(&changes, "price").is_ok());
        assert!(ensure_non_negative(&changes, "salary").is_ok());
        assert!(ensure_non_negative(&changes, "missing").is_ok());
        assert!(matches!(ensure_non_negative(&changes, "stock"), Err(AppError::ValidationError(_))));
        assert!(matches!(ensure_non_negative(&changes, "name"), Err(AppError::ValidationError(_))));
    }
}
