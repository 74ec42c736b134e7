//! Employee API abstraction used by the table and form controllers.

use async_trait::async_trait;

use super::error::ClientResult;
use crate::domain::{Employee, EmployeeChanges, EmployeeListParams, EmployeePage, NewEmployee};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Remote employee operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    /// Create an employee
    async fn create(&self, employee: NewEmployee) -> ClientResult<Employee>;

    /// Fetch one page of employees
    async fn list(&self, params: EmployeeListParams) -> ClientResult<EmployeePage>;

    /// Fetch a single employee
    async fn get(&self, employee_id: i64) -> ClientResult<Employee>;

    /// Send a partial update
    async fn update(&self, employee_id: i64, changes: EmployeeChanges) -> ClientResult<Employee>;

    /// Delete an employee, returning the server's confirmation message
    async fn delete(&self, employee_id: i64) -> ClientResult<String>;
}
