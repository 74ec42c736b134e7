//! Shared fixtures for integration tests.
//!
//! Every test gets its own in-memory SQLite database with migrations applied.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use employee_management::config::Config;
use employee_management::domain::{EmployeeType, NewEmployee};
use employee_management::infra::{Database, EmployeeStore};
use employee_management::services::EmployeeManager;
use employee_management::AppState;

/// Config pointing at a private in-memory database.
///
/// A single pooled connection keeps every query on the same database.
pub fn test_config() -> Config {
    Config {
        max_connections: 1,
        ..Config::with_database_url("sqlite::memory:")
    }
}

pub async fn test_database() -> Arc<Database> {
    Arc::new(
        Database::connect(&test_config())
            .await
            .expect("in-memory database should migrate"),
    )
}

pub fn store(db: &Database) -> EmployeeStore {
    EmployeeStore::new(db.get_connection())
}

pub fn service(db: &Database) -> EmployeeManager {
    EmployeeManager::new(Arc::new(store(db)))
}

pub async fn test_state() -> AppState {
    let db = test_database().await;
    AppState::from_database(db, &test_config())
}

/// A valid employee whose email and mobile number are derived from `n`
pub fn new_employee(n: u32) -> NewEmployee {
    NewEmployee {
        full_name: format!("Employee Number {}", n),
        initials: "E.N.".to_string(),
        display_name: format!("Emp{}", n),
        gender: "Female".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        email: format!("employee{}@example.com", n),
        mobile_number: format!("07{:08}", n),
        designation: "Software Engineer".to_string(),
        employee_type: EmployeeType::FullTime,
        experience: n as i32,
        joined_date: NaiveDate::from_ymd_opt(2021, 3, 15).unwrap(),
        salary: 100000.0 + f64::from(n),
        personal_notes: None,
    }
}
