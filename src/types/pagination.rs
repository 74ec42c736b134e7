//! Pagination and ordering types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page window over a result set (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u64,
    pub limit: u64,
}

impl PaginationParams {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit())
    }

    /// Page size, never below one
    pub fn limit(&self) -> u64 {
        self.limit.max(1)
    }

    /// Number of pages needed for `total` items
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Opposite direction
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}
