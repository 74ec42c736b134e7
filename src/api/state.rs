//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, EmployeeStore};
use crate::services::{EmployeeManager, EmployeeService};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Employee service
    pub employee_service: Arc<dyn EmployeeService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Allowed CORS origin; `None` allows any origin
    pub cors_allowed_origin: Option<String>,
}

impl AppState {
    /// Wire the SeaORM-backed services onto an open database.
    pub fn from_database(database: Arc<Database>, config: &Config) -> Self {
        let repo = Arc::new(EmployeeStore::new(database.get_connection()));
        let employee_service: Arc<dyn EmployeeService> = Arc::new(EmployeeManager::new(repo));

        Self {
            employee_service,
            database,
            cors_allowed_origin: config.cors_allowed_origin.clone(),
        }
    }

    /// Create application state with a manually injected service.
    pub fn new(employee_service: Arc<dyn EmployeeService>, database: Arc<Database>) -> Self {
        Self {
            employee_service,
            database,
            cors_allowed_origin: None,
        }
    }

    /// Restrict CORS to a single origin.
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_allowed_origin = Some(origin.into());
        self
    }
}
