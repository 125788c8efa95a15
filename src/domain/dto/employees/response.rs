//! 직원 응답 DTO

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::domain::dto::common::MetaResponse;
use crate::domain::entities::Employee;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub salary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hired_at: Option<NaiveDate>,
    #[serde(flatten)]
    pub meta: MetaResponse,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        let full_name = employee.full_name();
        Self {
            id: employee.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: employee.first_name,
            last_name: employee.last_name,
            full_name,
            email: employee.email,
            department: employee.department,
            position: employee.position,
            salary: employee.salary,
            hired_at: employee.hired_at,
            meta: employee.meta.into(),
        }
    }
}
