//! # Generic CRUD HTTP Handlers
//!
//! [`CrudResource`]를 구현한 모든 엔티티 서비스에 공통으로 쓰이는 핸들러입니다.
//! 서비스 인스턴스는 `web::Data<S>`로 주입됩니다.
//!
//! | 메서드 | 경로 | 핸들러 | 상태 코드 |
//! |--------|------|--------|-----------|
//! | `POST` | `/` | [`create`] | 201 Created |
//! | `GET` | `/` | [`list`] | 200 OK |
//! | `GET` | `/search?q=` | [`search`] | 200 OK |
//! | `GET` | `/{id}` | [`get`] | 200 OK |
//! | `PATCH` | `/{id}` | [`update`] | 200 OK |
//! | `DELETE` | `/{id}` | [`remove`] | 204 No Content |
//! | `DELETE` | `/{id}/soft` | [`soft_remove`] | 200 OK |
//! | `POST` | `/{id}/restore` | [`restore`] | 200 OK |
//!
//! 응답 본문은 항상 엔티티의 응답 DTO(`Entity::Response`)입니다.
//! 행위자는 `X-User-Id` 헤더에서 추출됩니다.

use actix_web::{web, HttpResponse};
use log::error;
use mongodb::bson;
use validator::Validate;
use crate::{
    domain::{
        dto::common::{ListParams, SearchParams},
        entities::Entity,
        models::RequestActor,
    },
    errors::errors::AppError,
    services::base::CrudResource,
};

type ResponseOf<S> = <<S as CrudResource>::Entity as Entity>::Response;

fn to_response<S: CrudResource>(entity: S::Entity) -> ResponseOf<S> {
    <ResponseOf<S> as From<S::Entity>>::from(entity)
}

pub async fn create<S: CrudResource>(
    service: web::Data<S>,
    actor: RequestActor,
    payload: web::Json<S::CreateRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    request.validate()?;

    let created = service.crud().create(request.into(), actor.user_id()).await?;

    Ok(HttpResponse::Created().json(to_response::<S>(created)))
}

pub async fn list<S: CrudResource>(
    service: web::Data<S>,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let page = service.crud().find_all(&query).await?;

    Ok(HttpResponse::Ok().json(page.map(to_response::<S>)))
}

pub async fn search<S: CrudResource>(
    service: web::Data<S>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    let page = service.crud().search(&query).await?;

    Ok(HttpResponse::Ok().json(page.map(to_response::<S>)))
}

pub async fn get<S: CrudResource>(
    service: web::Data<S>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let entity = service.crud().find_one(&id).await?;

    Ok(HttpResponse::Ok().json(to_response::<S>(entity)))
}

/// 부분 수정
///
/// 요청 DTO에서 값이 있는 필드만 변경 문서로 전달됩니다.
pub async fn update<S: CrudResource>(
    service: web::Data<S>,
    actor: RequestActor,
    id: web::Path<String>,
    payload: web::Json<S::UpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    request.validate()?;

    let changes = bson::to_document(&request).map_err(|e| {
        error!("수정 요청 변환 실패: {}", e);
        AppError::internal()
    })?;
    let updated = service.crud().update(&id, changes, actor.user_id()).await?;

    Ok(HttpResponse::Ok().json(to_response::<S>(updated)))
}

pub async fn remove<S: CrudResource>(
    service: web::Data<S>,
    actor: RequestActor,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.crud().remove(&id, actor.user_id()).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn soft_remove<S: CrudResource>(
    service: web::Data<S>,
    actor: RequestActor,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deleted = service.crud().soft_remove(&id, actor.user_id()).await?;

    Ok(HttpResponse::Ok().json(to_response::<S>(deleted)))
}

pub async fn restore<S: CrudResource>(
    service: web::Data<S>,
    actor: RequestActor,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let restored = service.crud().restore(&id, actor.user_id()).await?;

    Ok(HttpResponse::Ok().json(to_response::<S>(restored)))
}

/// 엔티티 서비스 `S`의 CRUD 라우트를 등록합니다.
///
/// `/search`는 `/{id}`보다 먼저 등록되어야 합니다.
pub fn configure<S: CrudResource>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create::<S>))
            .route(web::get().to(list::<S>)),
    )
    .service(web::resource("/search").route(web::get().to(search::<S>)))
    .service(
        web::resource("/{id}")
            .route(web::get().to(get::<S>))
            .route(web::patch().to(update::<S>))
            .route(web::put().to(update::<S>))
            .route(web::delete().to(remove::<S>)),
    )
    .service(web::resource("/{id}/soft").route(web::delete().to(soft_remove::<S>)))
    .service(web::resource("/{id}/restore").route(web::post().to(restore::<S>)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use crate::core::Infrastructure;
    use crate::domain::models::ACTOR_HEADER;
    use crate::services::products::ProductService;

    macro_rules! product_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(ProductService::with_infrastructure(
                        &Infrastructure::in_memory(),
                    )))
                    .service(web::scope("/api/v1/products").configure(configure::<ProductService>)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_crud_lifecycle_over_http() {
        let app = product_app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/products")
            .insert_header((ACTOR_HEADER, "user-1"))
            .set_json(json!({ "name": "Keyboard", "sku": "kb-01", "price": 49.0, "stock": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["sku"], "KB-01");
        assert_eq!(created["created_by"], "user-1");
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::patch()
            .uri(&format!("/api/v1/products/{}", id))
            .set_json(json!({ "price": 39.0 }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["price"], 39.0);
        assert_eq!(updated["stock"], 3);

        let req = test::TestRequest::get().uri("/api/v1/products?limit=5").to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["total"], 1);
        assert_eq!(page["items"][0]["id"], id.as_str());

        let req = test::TestRequest::get().uri("/api/v1/products/search?q=keyb").to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found["total"], 1);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/products/{}/soft", id))
            .to_request();
        let deleted: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deleted["is_deleted"], true);

        let req = test::TestRequest::get().uri(&format!("/api/v1/products/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/products/{}/restore", id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::delete().uri(&format!("/api/v1/products/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&format!("/api/v1/products/{}", id)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_client_errors_map_to_status_codes() {
        let app = product_app!();

        let req = test::TestRequest::get().uri("/api/v1/products/not-an-id").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/products")
            .set_json(json!({ "name": "", "sku": "X-1", "price": 1.0 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/v1/products/search").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let create_mouse = || {
            test::TestRequest::post()
                .uri("/api/v1/products")
                .set_json(json!({ "name": "Mouse", "sku": "MS-1", "price": 10.0 }))
                .to_request()
        };
        assert_eq!(test::call_service(&app, create_mouse()).await.status(), StatusCode::CREATED);
        assert_eq!(test::call_service(&app, create_mouse()).await.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_empty_update_is_bad_request() {
        let app = product_app!();

        let req = test::TestRequest::post()
            .uri("/api/v1/products")
            .set_json(json!({ "name": "Hub", "sku": "HUB-1", "price": 5.0 }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/v1/products/{}", created["id"].as_str().unwrap()))
            .set_json(json!({}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
