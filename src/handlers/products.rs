//! 상품 전용 조회 핸들러
//!
//! 공통 CRUD 라우트는 [`crud`](super::crud)가 담당하고,
//! 여기에는 상품 고유 조회만 있습니다.

use actix_web::{get, web, HttpResponse};
use crate::{
    domain::dto::{common::ListParams, products::ProductResponse},
    errors::errors::AppError,
    services::products::ProductService,
};

/// SKU로 상품 조회 (대소문자 무시)
#[get("/sku/{sku}")]
pub async fn get_by_sku(
    service: web::Data<ProductService>,
    sku: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = service.find_by_sku(&sku).await?;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

#[get("/category/{category}")]
pub async fn list_by_category(
    service: web::Data<ProductService>,
    category: web::Path<String>,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let page = service.find_by_category(&category, &query).await?;

    Ok(HttpResponse::Ok().json(page.map(ProductResponse::from)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use crate::core::Infrastructure;
    use crate::handlers::crud;

    #[actix_web::test]
    async fn test_sku_and_category_lookup() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ProductService::with_infrastructure(&Infrastructure::in_memory())))
                .service(
                    web::scope("/api/v1/products")
                        .service(get_by_sku)
                        .service(list_by_category)
                        .configure(crud::configure::<ProductService>),
                ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/products")
            .set_json(json!({ "name": "Webcam", "sku": "wc-9", "price": 80.0, "category": "video" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/v1/products/sku/WC-9").to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found["name"], "Webcam");

        let req = test::TestRequest::get().uri("/api/v1/products/category/video").to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["total"], 1);

        let req = test::TestRequest::get().uri("/api/v1/products/sku/none").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
