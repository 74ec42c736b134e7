//! Error types shared by every layer.
//!
//! [`AppError`] renders itself as `{ "error": { "code", "message" } }` with
//! the matching HTTP status. Store and internal details are logged, never sent.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Unique employee attribute that collided with an existing record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    MobileNumber,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DuplicateField::Email => "Email",
            DuplicateField::MobileNumber => "Mobile Number",
        })
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} is already in use!")]
    Duplicate(DuplicateField),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Internal server error")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn employee_not_found(employee_id: i64) -> Self {
        AppError::NotFound(format!("Employee with id {} not found", employee_id))
    }

    /// Translate a store error, turning unique-index violations on
    /// email or mobile number into [`AppError::Duplicate`].
    pub fn from_write(err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            if detail.contains("mobile_number") {
                return AppError::Duplicate(DuplicateField::MobileNumber);
            }
            if detail.contains("email") {
                return AppError::Duplicate(DuplicateField::Email);
            }
        }
        AppError::Database(err)
    }

    pub fn status(&self) -> StatusCode {
        self.classify().0
    }

    /// HTTP status and machine-readable code
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Duplicate(_) => (StatusCode::BAD_REQUEST, "DUPLICATE"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message safe to show a client
    fn public_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Store operation failed");
                "A database error occurred".to_string()
            }
            AppError::Internal(detail) => {
                tracing::error!(%detail, "Internal failure");
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        let envelope = ErrorEnvelope {
            error: ErrorDetail {
                code,
                message: self.public_message(),
            },
        };

        (status, Json(envelope)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = field_messages(&errors)
            .into_iter()
            .map(|(_, message)| message)
            .collect();
        AppError::Validation(messages.join(", "))
    }
}

/// `(field, message)` pairs ordered by field name
pub fn field_messages(errors: &validator::ValidationErrors) -> Vec<(String, String)> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.clone(), message)
            })
        })
        .collect()
}
