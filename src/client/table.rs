//! Paginated employee table controller.
//!
//! Holds the current query and the last load result. Every setter that
//! changes the query re-fetches through an [`EmployeeApi`].

use super::api::EmployeeApi;
use crate::config::DEFAULT_PAGE_NUMBER;
use crate::domain::{Employee, EmployeeListParams, EmployeeSortField, EmployeeType};
use crate::types::SortOrder;

/// Result of the most recent fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded {
        employees: Vec<Employee>,
        total_pages: u64,
    },
    Failed(String),
}

/// Table view over the employee listing
#[derive(Debug, Clone)]
pub struct EmployeeTable {
    query: EmployeeListParams,
    state: LoadState,
    notification: Option<String>,
}

impl Default for EmployeeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeTable {
    pub fn new() -> Self {
        Self {
            query: EmployeeListParams::default(),
            state: LoadState::Idle,
            notification: None,
        }
    }

    /// Start with a non-default page size
    pub fn with_limit(limit: u64) -> Self {
        let mut table = Self::new();
        table.query.limit = limit;
        table
    }

    pub fn query(&self) -> &EmployeeListParams {
        &self.query
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Rows of the last successful load
    pub fn employees(&self) -> &[Employee] {
        match &self.state {
            LoadState::Loaded { employees, .. } => employees,
            _ => &[],
        }
    }

    pub fn total_pages(&self) -> u64 {
        match &self.state {
            LoadState::Loaded { total_pages, .. } => *total_pages,
            _ => 0,
        }
    }

    /// Take the pending error notification, if any
    pub fn take_notification(&mut self) -> Option<String> {
        self.notification.take()
    }

    /// Fetch the current page
    pub async fn refresh(&mut self, api: &dyn EmployeeApi) {
        self.state = LoadState::Loading;

        match api.list(self.query.clone()).await {
            Ok(page) => {
                self.state = LoadState::Loaded {
                    employees: page.employees,
                    total_pages: page.total_pages,
                };
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "Failed to load employees");
                self.notification = Some(message.clone());
                self.state = LoadState::Failed(message);
            }
        }
    }

    pub async fn set_page(&mut self, api: &dyn EmployeeApi, page: u64) {
        self.query.page = page.max(DEFAULT_PAGE_NUMBER);
        self.refresh(api).await;
    }

    /// Filter by employee type; `None` shows everyone. Resets to the first page.
    pub async fn set_filter(&mut self, api: &dyn EmployeeApi, employee_type: Option<EmployeeType>) {
        self.query.employee_type = employee_type;
        self.query.page = DEFAULT_PAGE_NUMBER;
        self.refresh(api).await;
    }

    /// Sort by `field` in `order`. Resets to the first page.
    pub async fn set_sort(
        &mut self,
        api: &dyn EmployeeApi,
        field: EmployeeSortField,
        order: SortOrder,
    ) {
        self.query.sort_by = Some(field);
        self.query.sort_order = order;
        self.query.page = DEFAULT_PAGE_NUMBER;
        self.refresh(api).await;
    }

    /// Column-header click: same field flips the order, a new field sorts ascending
    pub async fn toggle_sort(&mut self, api: &dyn EmployeeApi, field: EmployeeSortField) {
        let order = if self.query.sort_by == Some(field) {
            self.query.sort_order.reversed()
        } else {
            SortOrder::Asc
        };
        self.set_sort(api, field, order).await;
    }

    /// Delete a row and reload. Removing the only row of the last page steps
    /// back one page. Failures leave the rows in place and raise a notification.
    ///
    /// Returns whether the employee was deleted.
    pub async fn delete(&mut self, api: &dyn EmployeeApi, employee_id: i64) -> bool {
        let emptied_last_page = self.employees().len() == 1
            && self.query.page > DEFAULT_PAGE_NUMBER
            && self.query.page >= self.total_pages();

        match api.delete(employee_id).await {
            Ok(message) => {
                tracing::debug!(employee_id, %message, "Employee deleted");
                if emptied_last_page {
                    self.query.page -= 1;
                }
                self.refresh(api).await;
                true
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(employee_id, error = %message, "Failed to delete employee");
                self.notification = Some(message);
                false
            }
        }
    }
}
