//! 상품 응답 DTO

use serde::{Deserialize, Serialize};
use crate::domain::dto::common::MetaResponse;
use crate::domain::entities::Product;

/// 상품 응답
///
/// ObjectId를 16진수 문자열 `id`로 노출합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub meta: MetaResponse,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: product.name,
            sku: product.sku,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            meta: product.meta.into(),
        }
    }
}
