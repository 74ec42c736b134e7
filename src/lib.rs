//! Employee Management - REST service and client for employee records
//!
//! CRUD over a single employee collection with pagination, type filtering,
//! sorting, field validation and duplicate checks on email and mobile number.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Employee records and request shapes
//! - **services**: Validation, duplicate checks and use cases
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **client**: HTTP client plus table and form controllers
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (applies pending migrations)
//! cargo run -- serve --port 5000
//!
//! # Inspect migrations
//! cargo run -- migrate status
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::Employee;
pub use errors::{AppError, AppResult};
