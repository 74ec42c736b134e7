//! Employee repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Order, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, UpdateMany,
    Value,
};
use uuid::Uuid;

use super::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
use super::entities::sequence::{self, Entity as SequenceEntity};
use crate::config::EMPLOYEE_ID_SEQUENCE;
use crate::domain::{Employee, EmployeeChanges, EmployeeListParams, EmployeeSortField, NewEmployee};
use crate::errors::{AppError, AppResult};
use crate::types::SortOrder;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find employee by its public id
    async fn find_by_employee_id(&self, employee_id: i64) -> AppResult<Option<Employee>>;

    /// Find employee by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>>;

    /// Find employee by mobile number
    async fn find_by_mobile_number(&self, mobile_number: &str) -> AppResult<Option<Employee>>;

    /// Assign the next employee id and insert the record atomically
    async fn create(&self, employee: NewEmployee) -> AppResult<Employee>;

    /// Apply a partial update; `None` when no record has that id
    async fn update(&self, employee_id: i64, changes: EmployeeChanges)
        -> AppResult<Option<Employee>>;

    /// Delete by public id, returning the number of removed rows
    async fn delete(&self, employee_id: i64) -> AppResult<u64>;

    /// One filtered, sorted page plus the total number of matches
    async fn list(&self, params: &EmployeeListParams) -> AppResult<(Vec<Employee>, u64)>;
}

/// SeaORM-backed employee repository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Bump the employee id sequence inside `txn` and return the new value.
    ///
    /// The row lock taken by the update is held until the transaction ends,
    /// so concurrent creates never observe the same value.
    async fn next_employee_id(txn: &DatabaseTransaction) -> AppResult<i64> {
        let bumped = SequenceEntity::update_many()
            .col_expr(
                sequence::Column::Value,
                Expr::col(sequence::Column::Value).add(1),
            )
            .filter(sequence::Column::Name.eq(EMPLOYEE_ID_SEQUENCE))
            .exec(txn)
            .await?;

        if bumped.rows_affected == 0 {
            return Err(AppError::internal("employee id sequence is missing"));
        }

        let counter = SequenceEntity::find_by_id(EMPLOYEE_ID_SEQUENCE.to_string())
            .one(txn)
            .await?
            .ok_or_else(|| AppError::internal("employee id sequence is missing"))?;

        Ok(counter.value)
    }

    async fn insert_with_next_id(
        txn: &DatabaseTransaction,
        new: NewEmployee,
    ) -> AppResult<Employee> {
        let employee_id = Self::next_employee_id(txn).await?;
        let employee = Employee::from_new(employee_id, new);

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee.employee_id),
            full_name: Set(employee.full_name),
            initials: Set(employee.initials),
            display_name: Set(employee.display_name),
            gender: Set(employee.gender),
            date_of_birth: Set(employee.date_of_birth),
            email: Set(employee.email),
            mobile_number: Set(employee.mobile_number),
            designation: Set(employee.designation),
            employee_type: Set(employee.employee_type.as_str().to_string()),
            experience: Set(employee.experience),
            joined_date: Set(employee.joined_date),
            salary: Set(employee.salary),
            personal_notes: Set(employee.personal_notes),
        };

        let model = active_model.insert(txn).await.map_err(AppError::from_write)?;
        Employee::try_from(model)
    }
}

/// Add `column = value` to the update when a value was provided
fn assign<V: Into<Value>>(
    update: UpdateMany<EmployeeEntity>,
    column: employee::Column,
    value: Option<V>,
) -> UpdateMany<EmployeeEntity> {
    match value {
        Some(v) => update.col_expr(column, SimpleExpr::Value(v.into())),
        None => update,
    }
}

fn sort_column(field: EmployeeSortField) -> employee::Column {
    use employee::Column;

    match field {
        EmployeeSortField::EmployeeId => Column::EmployeeId,
        EmployeeSortField::FullName => Column::FullName,
        EmployeeSortField::Initials => Column::Initials,
        EmployeeSortField::DisplayName => Column::DisplayName,
        EmployeeSortField::Gender => Column::Gender,
        EmployeeSortField::DateOfBirth => Column::DateOfBirth,
        EmployeeSortField::Email => Column::Email,
        EmployeeSortField::MobileNumber => Column::MobileNumber,
        EmployeeSortField::Designation => Column::Designation,
        EmployeeSortField::EmployeeType => Column::EmployeeType,
        EmployeeSortField::Experience => Column::Experience,
        EmployeeSortField::JoinedDate => Column::JoinedDate,
        EmployeeSortField::Salary => Column::Salary,
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_by_employee_id(&self, employee_id: i64) -> AppResult<Option<Employee>> {
        EmployeeEntity::find()
            .filter(employee::Column::EmployeeId.eq(employee_id))
            .one(&self.db)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        EmployeeEntity::find()
            .filter(employee::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    async fn find_by_mobile_number(&self, mobile_number: &str) -> AppResult<Option<Employee>> {
        EmployeeEntity::find()
            .filter(employee::Column::MobileNumber.eq(mobile_number))
            .one(&self.db)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    async fn create(&self, employee: NewEmployee) -> AppResult<Employee> {
        let txn = self.db.begin().await?;

        match Self::insert_with_next_id(&txn, employee).await {
            Ok(created) => {
                txn.commit().await?;
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn update(
        &self,
        employee_id: i64,
        changes: EmployeeChanges,
    ) -> AppResult<Option<Employee>> {
        use employee::Column;

        if changes.is_empty() {
            return self.find_by_employee_id(employee_id).await;
        }

        let EmployeeChanges {
            full_name,
            initials,
            display_name,
            gender,
            date_of_birth,
            email,
            mobile_number,
            designation,
            employee_type,
            experience,
            joined_date,
            salary,
            personal_notes,
        } = changes;

        let mut update =
            EmployeeEntity::update_many().filter(Column::EmployeeId.eq(employee_id));
        update = assign(update, Column::FullName, full_name);
        update = assign(update, Column::Initials, initials);
        update = assign(update, Column::DisplayName, display_name);
        update = assign(update, Column::Gender, gender);
        update = assign(update, Column::DateOfBirth, date_of_birth);
        update = assign(update, Column::Email, email);
        update = assign(update, Column::MobileNumber, mobile_number);
        update = assign(update, Column::Designation, designation);
        update = assign(
            update,
            Column::EmployeeType,
            employee_type.map(|t| t.as_str().to_string()),
        );
        update = assign(update, Column::Experience, experience);
        update = assign(update, Column::JoinedDate, joined_date);
        update = assign(update, Column::Salary, salary);
        // Empty notes are stored as NULL
        update = assign(
            update,
            Column::PersonalNotes,
            personal_notes.map(|n| Some(n).filter(|n| !n.is_empty())),
        );

        let result = update.exec(&self.db).await.map_err(AppError::from_write)?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_employee_id(employee_id).await
    }

    async fn delete(&self, employee_id: i64) -> AppResult<u64> {
        let result = EmployeeEntity::delete_many()
            .filter(employee::Column::EmployeeId.eq(employee_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn list(&self, params: &EmployeeListParams) -> AppResult<(Vec<Employee>, u64)> {
        let mut select = EmployeeEntity::find();
        if let Some(employee_type) = params.employee_type {
            select = select.filter(employee::Column::EmployeeType.eq(employee_type.as_str()));
        }

        let total = select.clone().count(&self.db).await?;
        let pagination = params.pagination();
        if pagination.offset() >= total {
            return Ok((Vec::new(), total));
        }

        if let Some(field) = params.sort_by {
            let order = match params.sort_order {
                SortOrder::Asc => Order::Asc,
                SortOrder::Desc => Order::Desc,
            };
            select = select.order_by(sort_column(field), order);
        }
        // Stable page boundaries; also the default order when no sort is requested
        if params.sort_by != Some(EmployeeSortField::EmployeeId) {
            select = select.order_by_asc(employee::Column::EmployeeId);
        }

        let models = select
            .offset(pagination.offset())
            .limit(pagination.limit())
            .all(&self.db)
            .await?;

        let employees = models
            .into_iter()
            .map(Employee::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok((employees, total))
    }
}
