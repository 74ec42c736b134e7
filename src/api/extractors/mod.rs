//! Custom request extractors.

mod employee_id;
mod validated_json;
mod validated_query;

pub use employee_id::EmployeeIdPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
