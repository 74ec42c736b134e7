//! OpenAPI documentation configuration.
//!
//! Served as Swagger UI under `/documentation`.

use utoipa::OpenApi;

use crate::api::handlers::employee_handler;
use crate::domain::{
    Employee, EmployeeChanges, EmployeePage, EmployeeSortField, EmployeeType, NewEmployee,
};
use crate::types::{MessageResponse, SortOrder};

/// OpenAPI documentation for the employee management API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management API",
        version = "1.0.0",
        description = "CRUD, pagination, filtering and sorting for employee records"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        employee_handler::create_employee,
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            EmployeeChanges,
            EmployeePage,
            EmployeeType,
            EmployeeSortField,
            SortOrder,
            MessageResponse,
        )
    ),
    tags(
        (name = "Employees", description = "Employee record management")
    )
)]
pub struct ApiDoc;
