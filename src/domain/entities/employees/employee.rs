//! Employee Entity Implementation

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use crate::domain::dto::employees::response::EmployeeResponse;
use crate::domain::entities::shared::{Entity, EntityMeta};

/// 직원 엔티티
///
/// 이메일은 소문자로 정규화되어 저장되며 컬렉션 전체에서 유일합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    /// 회사 이메일 (unique)
    pub email: String,
    /// 소속 부서
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default)]
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hired_at: Option<NaiveDate>,
    #[serde(flatten)]
    pub meta: EntityMeta,
}

impl Employee {
    pub fn new(first_name: String, last_name: String, email: String, department: String) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            email,
            department,
            position: None,
            salary: 0.0,
            hired_at: None,
            meta: EntityMeta::default(),
        }
    }

    /// "이름 성" 형태의 전체 이름
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Employee {
    const NAME: &'static str = "employee";
    const COLLECTION: &'static str = "employees";
    const SEARCH_FIELDS: &'static [&'static str] =
        &["first_name", "last_name", "email", "department", "position"];
    const INDEXED_FIELDS: &'static [&'static str] = &["department"];
    const UNIQUE_FIELDS: &'static [&'static str] = &["email"];

    type Response = EmployeeResponse;

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
