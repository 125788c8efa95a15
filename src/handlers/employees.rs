//! 직원 전용 조회 핸들러

use actix_web::{get, web, HttpResponse};
use crate::{
    domain::dto::{common::ListParams, employees::EmployeeResponse},
    errors::errors::AppError,
    services::employees::EmployeeService,
};

#[get("/email/{email}")]
pub async fn get_by_email(
    service: web::Data<EmployeeService>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = service.find_by_email(&email).await?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

#[get("/department/{department}")]
pub async fn list_by_department(
    service: web::Data<EmployeeService>,
    department: web::Path<String>,
    query: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let page = service.find_by_department(&department, &query).await?;

    Ok(HttpResponse::Ok().json(page.map(EmployeeResponse::from)))
}
