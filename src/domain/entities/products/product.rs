//! Product Entity Implementation

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::domain::dto::products::response::ProductResponse;
use crate::domain::entities::shared::{Entity, EntityMeta};

/// 상품 엔티티
///
/// `products` 컬렉션의 문서와 1:1로 대응됩니다.
/// SKU는 대문자로 정규화되어 저장되며 컬렉션 전체에서 유일합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 상품명
    pub name: String,
    /// 재고 관리 코드 (unique)
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 판매 가격
    pub price: f64,
    /// 재고 수량
    #[serde(default)]
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

impl Product {
    pub fn new(name: String, sku: String, price: f64) -> Self {
        Self {
            id: None,
            name,
            sku,
            description: None,
            price,
            stock: 0,
            category: None,
            meta: EntityMeta::default(),
        }
    }
}

impl Entity for Product {
    const NAME: &'static str = "product";
    const COLLECTION: &'static str = "products";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "sku", "description", "category"];
    const INDEXED_FIELDS: &'static [&'static str] = &["category"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["sku"];

    type Response = ProductResponse;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_bookkeeping_fields_are_top_level() {
        let mut product = Product::new("Keyboard".into(), "KB-1".into(), 59.0);
        product.meta.created_by = Some("user-1".into());

        let doc = bson::to_document(&product).unwrap();

        assert_eq!(doc.get_str("created_by").unwrap(), "user-1");
        assert_eq!(doc.get_bool("is_deleted").unwrap(), false);
        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("meta"));
    }

    #[test]
    fn test_document_roundtrip_keeps_id() {
        let mut product = Product::new("Mouse".into(), "MS-1".into(), 19.5);
        let id = ObjectId::new();
        product.set_id(id);

        let doc = bson::to_document(&product).unwrap();
        let back: Product = bson::from_document(doc).unwrap();

        assert_eq!(back.id(), Some(id));
        assert_eq!(back, product);
    }

    #[test]
    fn test_flattened_dates_roundtrip_through_bson_and_json() {
        let mut product = Product::new("Hub".into(), "HUB-1".into(), 30.0);
        product.set_id(ObjectId::new());
        product.meta.stamp_created(Some("user-1"), bson::DateTime::from_millis(1_700_000_005_500));

        let doc = bson::to_document(&product).unwrap();
        assert!(doc.get_datetime("created_at").is_ok());
        let back: Product = bson::from_document(doc).unwrap();
        assert_eq!(back, product);

        // 캐시는 JSON으로 저장됨
        let json = serde_json::to_string(&product).unwrap();
        let cached: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(cached, product);
    }
}
