//! Employee service - Handles employee-related business logic.
//!
//! Validation and duplicate checks happen here before anything is written.
//! The store's unique indexes stay the final authority on duplicates.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use crate::domain::{Employee, EmployeeChanges, EmployeeListParams, EmployeePage, NewEmployee};
use crate::errors::{AppError, AppResult, DuplicateField};
use crate::infra::EmployeeRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Create an employee, assigning the next employee id
    async fn create_employee(&self, employee: NewEmployee) -> AppResult<Employee>;

    /// List one page of employees with optional filter and ordering
    async fn list_employees(&self, params: EmployeeListParams) -> AppResult<EmployeePage>;

    /// Get employee by id
    async fn get_employee(&self, employee_id: i64) -> AppResult<Employee>;

    /// Apply a partial update
    async fn update_employee(
        &self,
        employee_id: i64,
        changes: EmployeeChanges,
    ) -> AppResult<Employee>;

    /// Permanently delete an employee
    async fn delete_employee(&self, employee_id: i64) -> AppResult<()>;
}

/// Concrete implementation of EmployeeService over a repository.
pub struct EmployeeManager {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeManager {
    /// Create new employee service instance
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    /// Reject email or mobile number already held by someone other than `owner`.
    ///
    /// Both lookups run concurrently; an email clash is reported first.
    async fn ensure_unique(
        &self,
        email: Option<&str>,
        mobile_number: Option<&str>,
        owner: Option<i64>,
    ) -> AppResult<()> {
        let by_email = async {
            match email {
                Some(email) => self.repo.find_by_email(email).await,
                None => Ok(None),
            }
        };
        let by_mobile = async {
            match mobile_number {
                Some(mobile) => self.repo.find_by_mobile_number(mobile).await,
                None => Ok(None),
            }
        };
        let (email_holder, mobile_holder) = tokio::try_join!(by_email, by_mobile)?;

        let taken = |holder: Option<Employee>| {
            holder.is_some_and(|existing| Some(existing.employee_id) != owner)
        };

        if taken(email_holder) {
            return Err(AppError::Duplicate(DuplicateField::Email));
        }
        if taken(mobile_holder) {
            return Err(AppError::Duplicate(DuplicateField::MobileNumber));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeService for EmployeeManager {
    async fn create_employee(&self, employee: NewEmployee) -> AppResult<Employee> {
        employee.validate()?;
        self.ensure_unique(Some(&employee.email), Some(&employee.mobile_number), None)
            .await?;

        let created = self.repo.create(employee).await?;
        tracing::info!(employee_id = created.employee_id, "Employee created");
        Ok(created)
    }

    async fn list_employees(&self, params: EmployeeListParams) -> AppResult<EmployeePage> {
        params.validate()?;

        let (employees, total) = self.repo.list(&params).await?;
        let total_pages = params.pagination().total_pages(total);
        tracing::debug!(
            page = params.page,
            limit = params.limit,
            total,
            returned = employees.len(),
            "Listed employees"
        );

        Ok(EmployeePage {
            employees,
            total_pages,
        })
    }

    async fn get_employee(&self, employee_id: i64) -> AppResult<Employee> {
        self.repo
            .find_by_employee_id(employee_id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(employee_id))
    }

    async fn update_employee(
        &self,
        employee_id: i64,
        changes: EmployeeChanges,
    ) -> AppResult<Employee> {
        changes.validate()?;

        let existing = self.get_employee(employee_id).await?;
        if changes.is_empty() {
            return Ok(existing);
        }

        // Only look up values that actually change
        let email = changes
            .email
            .as_deref()
            .filter(|email| *email != existing.email);
        let mobile_number = changes
            .mobile_number
            .as_deref()
            .filter(|mobile| *mobile != existing.mobile_number);
        self.ensure_unique(email, mobile_number, Some(employee_id))
            .await?;

        let updated = self
            .repo
            .update(employee_id, changes)
            .await?
            .ok_or_else(|| AppError::employee_not_found(employee_id))?;
        tracing::info!(employee_id, "Employee updated");
        Ok(updated)
    }

    async fn delete_employee(&self, employee_id: i64) -> AppResult<()> {
        let removed = self.repo.delete(employee_id).await?;
        if removed == 0 {
            return Err(AppError::employee_not_found(employee_id));
        }

        tracing::info!(employee_id, "Employee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::EmployeeType;
    use crate::infra::MockEmployeeRepository;

    fn new_employee(email: &str, mobile: &str) -> NewEmployee {
        NewEmployee {
            full_name: "John Doe".to_string(),
            initials: "J.D.".to_string(),
            display_name: "John".to_string(),
            gender: "Male".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            email: email.to_string(),
            mobile_number: mobile.to_string(),
            designation: "Senior Developer".to_string(),
            employee_type: EmployeeType::Contract,
            experience: 2,
            joined_date: NaiveDate::from_ymd_opt(2020, 2, 10).unwrap(),
            salary: 450000.0,
            personal_notes: None,
        }
    }

    fn stored(employee_id: i64) -> Employee {
        Employee::from_new(employee_id, new_employee("john@example.com", "0712345678"))
    }

    fn service(repo: MockEmployeeRepository) -> EmployeeManager {
        EmployeeManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn create_assigns_id_from_store() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_find_by_mobile_number().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|new| Ok(Employee::from_new(1, new)));

        let created = service(repo)
            .create_employee(new_employee("john@example.com", "0712345678"))
            .await
            .unwrap();

        assert_eq!(created.employee_id, 1);
        assert_eq!(created.email, "john@example.com");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_without_inserting() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored(1))));
        repo.expect_find_by_mobile_number().returning(|_| Ok(None));
        repo.expect_create().times(0);

        let result = service(repo)
            .create_employee(new_employee("john@example.com", "0799999999"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Duplicate(DuplicateField::Email))
        ));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_mobile_without_inserting() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_find_by_mobile_number()
            .returning(|_| Ok(Some(stored(1))));
        repo.expect_create().times(0);

        let result = service(repo)
            .create_employee(new_employee("other@example.com", "0712345678"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Duplicate(DuplicateField::MobileNumber))
        ));
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields_before_touching_store() {
        let repo = MockEmployeeRepository::new();

        let result = service(repo)
            .create_employee(new_employee("john@example.com", "12345"))
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("10 digit")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_computes_total_pages() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_list()
            .returning(|_| Ok((vec![stored(6)], 6)));

        let params = EmployeeListParams {
            page: 2,
            ..Default::default()
        };
        let page = service(repo).list_employees(params).await.unwrap();

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.employees.len(), 1);
    }

    #[tokio::test]
    async fn list_rejects_zero_limit() {
        let repo = MockEmployeeRepository::new();
        let params = EmployeeListParams {
            limit: 0,
            ..Default::default()
        };

        let result = service(repo).list_employees(params).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn get_missing_employee_is_not_found() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_employee_id()
            .with(eq(2))
            .returning(|_| Ok(None));

        let result = service(repo).get_employee(2).await;
        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Employee with id 2 not found"),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_missing_employee_is_not_found() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_employee_id().returning(|_| Ok(None));
        repo.expect_update().times(0);

        let changes = EmployeeChanges {
            designation: Some("Lead Developer".to_string()),
            ..Default::default()
        };
        let result = service(repo).update_employee(1, changes).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_rejects_email_owned_by_someone_else() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_employee_id()
            .returning(|id| Ok(Some(stored(id))));
        repo.expect_find_by_email()
            .withf(|email| email == "taken@example.com")
            .returning(|_| Ok(Some(stored(9))));
        repo.expect_update().times(0);

        let changes = EmployeeChanges {
            email: Some("taken@example.com".to_string()),
            ..Default::default()
        };
        let result = service(repo).update_employee(1, changes).await;

        assert!(matches!(
            result,
            Err(AppError::Duplicate(DuplicateField::Email))
        ));
    }

    #[tokio::test]
    async fn update_with_unchanged_email_skips_duplicate_lookup() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_employee_id()
            .returning(|id| Ok(Some(stored(id))));
        repo.expect_find_by_email().times(0);
        repo.expect_update().returning(|id, changes| {
            let mut employee = stored(id);
            employee.apply(changes);
            Ok(Some(employee))
        });

        let changes = EmployeeChanges {
            email: Some("john@example.com".to_string()),
            designation: Some("Lead Developer".to_string()),
            ..Default::default()
        };
        let updated = service(repo).update_employee(3, changes).await.unwrap();

        assert_eq!(updated.designation, "Lead Developer");
        assert_eq!(updated.employee_id, 3);
    }

    #[tokio::test]
    async fn delete_missing_employee_is_not_found() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete().with(eq(5)).returning(|_| Ok(0));

        let result = service(repo).delete_employee(5).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_existing_employee_succeeds() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete().with(eq(5)).returning(|_| Ok(1));

        assert!(service(repo).delete_employee(5).await.is_ok());
    }
}
