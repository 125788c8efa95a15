//! 직원 DTO 모듈

pub mod request;
pub mod response;

pub use request::{CreateEmployeeRequest, UpdateEmployeeRequest};
pub use response::EmployeeResponse;
