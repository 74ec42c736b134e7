//! Shared types for list endpoints and responses.

mod pagination;
mod response;

pub use pagination::{PaginationParams, SortOrder};
pub use response::{Created, MessageResponse};
