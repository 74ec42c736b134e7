//! Domain layer - Core business entities
//!
//! Employee records and the request shapes that create, change, and
//! list them. Independent of storage and transport concerns.

pub mod employee;

pub use employee::{
    Employee, EmployeeChanges, EmployeeListParams, EmployeePage, EmployeeSortField,
    EmployeeType, NewEmployee,
};
