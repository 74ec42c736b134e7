//! Employee id path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// The `:id` path segment, guaranteed to be a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeIdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EmployeeIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        parse_employee_id(&raw).map(EmployeeIdPath)
    }
}

fn parse_employee_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::validation(format!(
            "Employee id must be a positive integer, got '{}'",
            raw
        ))),
    }
}
