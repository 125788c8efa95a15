//! Employees Entity Module

pub mod employee;

pub use employee::Employee;
