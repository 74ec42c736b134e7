//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod employee_service;

pub use employee_service::{EmployeeManager, EmployeeService};

#[cfg(any(test, feature = "test-utils"))]
pub use employee_service::MockEmployeeService;
