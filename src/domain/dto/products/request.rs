//! 상품 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::{EntityMeta, Product};

/// 상품 생성 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "상품명은 1-200자 사이여야 합니다"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "SKU는 1-64자 사이여야 합니다"))]
    pub sku: String,

    #[validate(length(max = 2000, message = "설명은 2000자 이하여야 합니다"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: f64,

    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    #[serde(default)]
    pub stock: i64,

    pub category: Option<String>,
}

impl From<CreateProductRequest> for Product {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            id: None,
            name: req.name,
            sku: req.sku,
            description: req.description,
            price: req.price,
            stock: req.stock,
            category: req.category,
            meta: EntityMeta::default(),
        }
    }
}

/// 상품 부분 수정 요청
///
/// 값이 있는 필드만 `$set` 변경 문서에 포함됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "상품명은 1-200자 사이여야 합니다"))]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64, message = "SKU는 1-64자 사이여야 합니다"))]
    pub sku: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "설명은 2000자 이하여야 합니다"))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub stock: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateProductRequest {
            name: "Keyboard".into(),
            sku: "kb-1".into(),
            description: None,
            price: 10.0,
            stock: 3,
            category: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateProductRequest { price: -1.0, name: String::new(), ..valid };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_update_request_only_serializes_present_fields() {
        let req = UpdateProductRequest {
            price: Some(12.5),
            ..Default::default()
        };
        let doc = bson::to_document(&req).unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_f64("price").unwrap(), 12.5);
    }
}
