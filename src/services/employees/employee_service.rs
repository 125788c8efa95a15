//! # 직원 서비스
//!
//! `CrudService<Employee>` 위에 직원 고유 규칙을 얹은 싱글톤 서비스입니다.
//! 이메일은 소문자로 저장되고 삭제되지 않은 직원 사이에서 유일합니다.

use std::any::Any;
use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use once_cell::sync::OnceCell;
use crate::{
    core::{registry::ServiceLocator, Infrastructure},
    domain::{
        dto::{
            common::{ListParams, PaginatedResponse},
            employees::{CreateEmployeeRequest, UpdateEmployeeRequest},
        },
        entities::Employee,
    },
    errors::errors::{AppError, AppResult},
    repositories::DocumentStore,
    services::base::{ensure_non_negative, CrudHooks, CrudResource, CrudService},
    utils::string_utils::{clean_optional_string, validate_required_string},
};

/// 직원 관리 서비스
pub struct EmployeeService {
    crud: CrudService<Employee>,
}

static EMPLOYEE_SERVICE_INSTANCE: OnceCell<Arc<EmployeeService>> = OnceCell::new();

impl EmployeeService {
    pub fn instance() -> Arc<Self> {
        EMPLOYEE_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new()))
            .clone()
    }

    fn new() -> Self {
        let infrastructure = ServiceLocator::get::<Infrastructure>();
        Self::with_infrastructure(&infrastructure)
    }

    pub fn with_infrastructure(infrastructure: &Infrastructure) -> Self {
        let store = infrastructure.store::<Employee>();
        let crud = CrudService::new(
            store.clone(),
            infrastructure.cache.clone(),
            infrastructure.audit.clone(),
            infrastructure.events.clone(),
        )
        .with_hooks(Arc::new(EmployeeHooks::new(store)));

        Self { crud }
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Employee> {
        let email = normalize_email(email)?;

        self.crud
            .find_one_by(doc! { "email": &email })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("이메일 {}인 직원을 찾을 수 없습니다", email)))
    }

    /// 부서별 직원 목록
    pub async fn find_by_department(
        &self,
        department: &str,
        params: &ListParams,
    ) -> AppResult<PaginatedResponse<Employee>> {
        let department = validate_required_string(department, "department")?;
        self.crud.find_all_where(params, doc! { "department": department }).await
    }
}

impl CrudResource for EmployeeService {
    type Entity = Employee;
    type CreateRequest = CreateEmployeeRequest;
    type UpdateRequest = UpdateEmployeeRequest;

    fn crud(&self) -> &CrudService<Employee> {
        &self.crud
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    Ok(validate_required_string(email, "email")?.to_lowercase())
}

/// 직원 라이프사이클 훅
pub struct EmployeeHooks {
    store: Arc<dyn DocumentStore<Employee>>,
}

impl EmployeeHooks {
    pub fn new(store: Arc<dyn DocumentStore<Employee>>) -> Self {
        Self { store }
    }

    async fn ensure_unique_email(&self, email: &str, except: Option<&ObjectId>) -> Result<(), AppError> {
        if let Some(existing) = self.store.find_one(doc! { "email": email }).await? {
            if existing.id.as_ref() != except {
                return Err(AppError::ConflictError(format!("이미 등록된 이메일입니다: {}", email)));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CrudHooks<Employee> for EmployeeHooks {
    async fn before_create(&self, employee: &mut Employee) -> Result<(), AppError> {
        employee.first_name = validate_required_string(&employee.first_name, "first_name")?;
        employee.last_name = validate_required_string(&employee.last_name, "last_name")?;
        employee.department = validate_required_string(&employee.department, "department")?;
        employee.email = normalize_email(&employee.email)?;
        employee.position = clean_optional_string(employee.position.take());

        if employee.salary < 0.0 {
            return Err(AppError::ValidationError("salary은(는) 0 이상이어야 합니다".to_string()));
        }

        self.ensure_unique_email(&employee.email, None).await
    }

    async fn before_update(&self, id: &ObjectId, changes: &mut Document) -> Result<(), AppError> {
        ensure_non_negative(changes, "salary")?;

        for field in ["first_name", "last_name", "department"] {
            if let Ok(value) = changes.get_str(field) {
                let value = validate_required_string(value, field)?;
                changes.insert(field, value);
            }
        }

        if let Some(email) = changes.get("email") {
            let email = match email {
                Bson::String(email) => normalize_email(email)?,
                _ => return Err(AppError::ValidationError("email은(는) 문자열이어야 합니다".to_string())),
            };
            self.ensure_unique_email(&email, Some(id)).await?;
            changes.insert("email", email);
        }

        Ok(())
    }
}

fn employee_service_constructor() -> Arc<dyn Any + Send + Sync> {
    EmployeeService::instance()
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "employee_service",
        constructor: employee_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> EmployeeService {
        EmployeeService::with_infrastructure(&Infrastructure::in_memory())
    }

    fn employee(first: &str, email: &str, department: &str) -> Employee {
        Employee::new(first.to_string(), "Kim".to_string(), email.to_string(), department.to_string())
    }

    #[actix_web::test]
    async fn test_create_lowercases_email_and_rejects_duplicates() {
        let service = service();

        let created = service
            .crud()
            .create(employee(" Minji ", "Minji.Kim@Example.com", "R&D"), Some("hr-1"))
            .await
            .unwrap();
        assert_eq!(created.first_name, "Minji");
        assert_eq!(created.email, "minji.kim@example.com");
        assert_eq!(created.full_name(), "Minji Kim");

        let duplicate = service
            .crud()
            .create(employee("Other", "MINJI.KIM@example.com", "Sales"), None)
            .await;
        assert!(matches!(duplicate, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_soft_removed_email_can_be_reused() {
        let service = service();
        let created = service.crud().create(employee("A", "a@example.com", "Ops"), None).await.unwrap();
        let id = created.id.unwrap().to_hex();

        service.crud().soft_remove(&id, None).await.unwrap();

        assert!(service.crud().create(employee("B", "a@example.com", "Ops"), None).await.is_ok());

        // 같은 이메일이 다시 쓰이고 있으므로 복구는 충돌
        let result = service.crud().restore(&id, None).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_update_rules() {
        let service = service();
        let created = service.crud().create(employee("A", "a@example.com", "Ops"), None).await.unwrap();
        service.crud().create(employee("B", "b@example.com", "Ops"), None).await.unwrap();
        let id = created.id.unwrap().to_hex();

        let result = service.crud().update(&id, doc! { "salary": -100.0 }, None).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let result = service.crud().update(&id, doc! { "email": "B@example.com" }, None).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));

        let result = service.crud().update(&id, doc! { "department": "  " }, None).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let updated = service.crud().update(&id, doc! { "department": " Finance " }, None).await.unwrap();
        assert_eq!(updated.department, "Finance");
    }

    #[actix_web::test]
    async fn test_find_by_email_and_department() {
        let service = service();
        service.crud().create(employee("A", "a@example.com", "Ops"), None).await.unwrap();
        service.crud().create(employee("B", "b@example.com", "Sales"), None).await.unwrap();
        service.crud().create(employee("C", "c@example.com", "Sales"), None).await.unwrap();

        assert_eq!(service.find_by_email("A@EXAMPLE.COM").await.unwrap().first_name, "A");
        assert!(matches!(service.find_by_email("z@example.com").await, Err(AppError::NotFound(_))));

        let sales = service.find_by_department("Sales", &ListParams::default()).await.unwrap();
        assert_eq!(sales.total, 2);
    }
}
