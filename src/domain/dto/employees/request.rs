//! 직원 요청 DTO

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::{Employee, EntityMeta};

/// 직원 생성 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "성은 1-100자 사이여야 합니다"))]
    pub last_name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "부서명은 1-100자 사이여야 합니다"))]
    pub department: String,

    pub position: Option<String>,

    #[validate(range(min = 0.0, message = "급여는 0 이상이어야 합니다"))]
    #[serde(default)]
    pub salary: f64,

    pub hired_at: Option<NaiveDate>,
}

impl From<CreateEmployeeRequest> for Employee {
    fn from(req: CreateEmployeeRequest) -> Self {
        Self {
            id: None,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            department: req.department,
            position: req.position,
            salary: req.salary,
            hired_at: req.hired_at,
            meta: EntityMeta::default(),
        }
    }
}

/// 직원 부분 수정 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "성은 1-100자 사이여야 합니다"))]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "부서명은 1-100자 사이여야 합니다"))]
    pub department: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "급여는 0 이상이어야 합니다"))]
    pub salary: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hired_at: Option<NaiveDate>,
}
