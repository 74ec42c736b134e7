//! Client library for the employee API.
//!
//! - [`HttpEmployeeClient`]: reqwest-backed implementation of [`EmployeeApi`]
//! - [`EmployeeTable`]: paginated, sortable, filterable listing state
//! - [`EmployeeForm`]: create / edit dialog state with client-side validation

mod api;
mod error;
mod form;
mod http;
mod table;

pub use api::EmployeeApi;
pub use error::{ClientError, ClientResult};
pub use form::{EmployeeDraft, EmployeeForm, FieldError, FormError, FormMode};
pub use http::{ClientConfig, HttpEmployeeClient};
pub use table::{EmployeeTable, LoadState};

#[cfg(any(test, feature = "test-utils"))]
pub use api::MockEmployeeApi;
