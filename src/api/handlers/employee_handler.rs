//! Employee handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{EmployeeIdPath, ValidatedJson, ValidatedQuery};
use crate::api::AppState;
use crate::domain::{Employee, EmployeeChanges, EmployeeListParams, EmployeePage, NewEmployee};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).patch(update_employee).delete(delete_employee),
        )
}

/// Create a new employee
#[utoipa::path(
    post,
    path = "/v1/employees",
    tag = "Employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error or duplicate email / mobile number"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewEmployee>,
) -> AppResult<Created<Employee>> {
    let employee = state.employee_service.create_employee(payload).await?;
    Ok(Created(employee))
}

/// List employees with pagination, type filter and sorting
#[utoipa::path(
    get,
    path = "/v1/employees",
    tag = "Employees",
    params(EmployeeListParams),
    responses(
        (status = 200, description = "One page of employees", body = EmployeePage),
        (status = 400, description = "Invalid query parameters")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<EmployeeListParams>,
) -> AppResult<Json<EmployeePage>> {
    let page = state.employee_service.list_employees(params).await?;
    Ok(Json(page))
}

/// Get employee by id
#[utoipa::path(
    get,
    path = "/v1/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, description = "Invalid employee id"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    EmployeeIdPath(id): EmployeeIdPath,
) -> AppResult<Json<Employee>> {
    let employee = state.employee_service.get_employee(id).await?;
    Ok(Json(employee))
}

/// Update some fields of an employee
#[utoipa::path(
    patch,
    path = "/v1/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = EmployeeChanges,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Validation error or duplicate email / mobile number"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    EmployeeIdPath(id): EmployeeIdPath,
    ValidatedJson(payload): ValidatedJson<EmployeeChanges>,
) -> AppResult<Json<Employee>> {
    let employee = state.employee_service.update_employee(id, payload).await?;
    Ok(Json(employee))
}

/// Permanently delete an employee
#[utoipa::path(
    delete,
    path = "/v1/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 400, description = "Invalid employee id"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    EmployeeIdPath(id): EmployeeIdPath,
) -> AppResult<Json<MessageResponse>> {
    state.employee_service.delete_employee(id).await?;
    Ok(Json(MessageResponse::new(format!("Employee {} deleted", id))))
}
