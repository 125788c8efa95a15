//! API 라우트 설정 모듈
//!
//! 엔티티별 CRUD 엔드포인트와 헬스체크 엔드포인트를 등록합니다.
//! 핸들러가 사용하는 서비스 인스턴스(`web::Data<ProductService>` 등)는
//! `main.rs`에서 `app_data`로 주입됩니다.
//!
//! # Routes
//!
//! | 경로 | 설명 |
//! |------|------|
//! | `/api/v1/products` | 상품 CRUD + `/sku/{sku}`, `/category/{category}` |
//! | `/api/v1/employees` | 직원 CRUD + `/email/{email}`, `/department/{department}` |
//! | `/health` | 헬스체크 |
//!
//! 엔티티별 CRUD 라우트 구성은 [`handlers::crud::configure`]를 참고하세요.

use crate::core::{registry::ServiceLocator, Infrastructure};
use crate::handlers;
use crate::services::{employees::EmployeeService, products::ProductService};
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_product_routes(cfg);
    configure_employee_routes(cfg);
}

/// 상품 라우트를 설정합니다
///
/// # Examples
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/products \
///   -H "Content-Type: application/json" \
///   -H "X-User-Id: user-42" \
///   -d '{"name":"Keyboard","sku":"kb-01","price":49.0}'
///
/// curl "http://localhost:8080/api/v1/products/search?q=key&limit=5"
/// ```
pub fn configure_product_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/products")
            .service(handlers::products::get_by_sku)
            .service(handlers::products::list_by_category)
            .configure(handlers::crud::configure::<ProductService>),
    );
}

/// 직원 라우트를 설정합니다
pub fn configure_employee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/employees")
            .service(handlers::employees::get_by_email)
            .service(handlers::employees::list_by_department)
            .configure(handlers::crud::configure::<EmployeeService>),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "crud_service_backend",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "store": "mongo",
///   "database": "crud_service_dev",
///   "event_subscribers": 1
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    let infrastructure = ServiceLocator::try_get::<Infrastructure>();
    actix_web::HttpResponse::Ok().json(health_report(infrastructure.as_deref()))
}

fn health_report(infrastructure: Option<&Infrastructure>) -> serde_json::Value {
    let mut report = json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "store": "uninitialized"
    });

    if let Some(infra) = infrastructure {
        report["store"] = json!(infra.backend_name());
        report["database"] = json!(infra.database.as_ref().map(|db| db.database_name()));
        report["event_subscribers"] = json!(infra.events.subscriber_count());
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "crud_service_backend");
    }

    #[::core::prelude::v1::test]
    fn test_health_report_describes_infrastructure() {
        let infra = Infrastructure::in_memory();
        let _receiver = infra.events.subscribe();

        let report = health_report(Some(&infra));
        assert_eq!(report["store"], "memory");
        assert!(report["database"].is_null());
        assert_eq!(report["event_subscribers"], 1);

        let report = health_report(None);
        assert_eq!(report["store"], "uninitialized");
        assert!(report.get("event_subscribers").is_none());
    }

    #[actix_web::test]
    async fn test_all_routes_share_injected_services() {
        let infra = Infrastructure::in_memory();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ProductService::with_infrastructure(&infra)))
                .app_data(web::Data::new(EmployeeService::with_infrastructure(&infra)))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/products").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/v1/employees/search?q=kim").to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["total"], 0);
    }
}
