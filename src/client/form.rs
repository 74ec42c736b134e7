//! Create / edit form controller for a single employee.

use chrono::NaiveDate;
use thiserror::Error;
use validator::Validate;

use super::api::EmployeeApi;
use super::error::ClientError;
use super::table::EmployeeTable;
use crate::domain::{Employee, EmployeeChanges, EmployeeType, NewEmployee};
use crate::errors::field_messages;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which dialog is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Create,
    Edit(i64),
}

/// Message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Why a submit did not go through
#[derive(Debug, Error)]
pub enum FormError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Api(#[from] ClientError),

    #[error("form is not open")]
    NotOpen,
}

/// Raw form inputs, kept as text until submit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeDraft {
    pub full_name: String,
    pub initials: String,
    pub display_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub email: String,
    pub mobile_number: String,
    pub designation: String,
    pub employee_type: String,
    pub experience: String,
    pub joined_date: String,
    pub salary: String,
    pub personal_notes: String,
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            full_name: employee.full_name.clone(),
            initials: employee.initials.clone(),
            display_name: employee.display_name.clone(),
            gender: employee.gender.clone(),
            date_of_birth: employee.date_of_birth.format(DATE_FORMAT).to_string(),
            email: employee.email.clone(),
            mobile_number: employee.mobile_number.clone(),
            designation: employee.designation.clone(),
            employee_type: employee.employee_type.to_string(),
            experience: employee.experience.to_string(),
            joined_date: employee.joined_date.format(DATE_FORMAT).to_string(),
            salary: employee.salary.to_string(),
            personal_notes: employee.personal_notes.clone().unwrap_or_default(),
        }
    }
}

impl EmployeeDraft {
    /// Parse the text inputs and apply the server's validation rules
    pub fn parse(&self) -> Result<NewEmployee, Vec<FieldError>> {
        let mut errors = Vec::new();

        let date_of_birth = parse_date(&self.date_of_birth, "date_of_birth", &mut errors);
        let joined_date = parse_date(&self.joined_date, "joined_date", &mut errors);
        let employee_type = self
            .employee_type
            .trim()
            .parse::<EmployeeType>()
            .map_err(|e| errors.push(FieldError::new("employee_type", e)))
            .ok();
        let experience = self
            .experience
            .trim()
            .parse::<i32>()
            .map_err(|_| {
                errors.push(FieldError::new("experience", "Experience must be a whole number"))
            })
            .ok();
        let salary = self
            .salary
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite());
        if salary.is_none() {
            errors.push(FieldError::new("salary", "Salary must be a number"));
        }

        let (
            Some(date_of_birth),
            Some(joined_date),
            Some(employee_type),
            Some(experience),
            Some(salary),
        ) = (date_of_birth, joined_date, employee_type, experience, salary)
        else {
            return Err(errors);
        };

        let employee = NewEmployee {
            full_name: self.full_name.trim().to_string(),
            initials: self.initials.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
            gender: self.gender.trim().to_string(),
            date_of_birth,
            email: self.email.trim().to_string(),
            mobile_number: self.mobile_number.trim().to_string(),
            designation: self.designation.trim().to_string(),
            employee_type,
            experience,
            joined_date,
            salary,
            personal_notes: Some(self.personal_notes.trim().to_string())
                .filter(|n| !n.is_empty()),
        };

        employee.validate().map_err(|validation| {
            field_messages(&validation)
                .into_iter()
                .map(|(field, message)| FieldError { field, message })
                .collect::<Vec<_>>()
        })?;

        Ok(employee)
    }
}

fn parse_date(raw: &str, field: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(field, "Date must be in YYYY-MM-DD format"));
            None
        }
    }
}

/// Modal form used for both creating and editing employees
#[derive(Debug, Clone)]
pub struct EmployeeForm {
    mode: FormMode,
    draft: EmployeeDraft,
    original: Option<Employee>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Closed,
            draft: EmployeeDraft::default(),
            original: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EmployeeDraft {
        &mut self.draft
    }

    /// Open with an empty draft
    pub fn open_create(&mut self) {
        self.mode = FormMode::Create;
        self.draft = EmployeeDraft::default();
        self.original = None;
    }

    /// Open pre-filled with an existing record
    pub fn open_edit(&mut self, employee: &Employee) {
        self.mode = FormMode::Edit(employee.employee_id);
        self.draft = EmployeeDraft::from(employee);
        self.original = Some(employee.clone());
    }

    pub fn close(&mut self) {
        self.mode = FormMode::Closed;
        self.draft = EmployeeDraft::default();
        self.original = None;
    }

    /// Per-field problems with the current draft; empty when it can be submitted
    pub fn validate(&self) -> Vec<FieldError> {
        self.draft.parse().err().unwrap_or_default()
    }

    /// Validate, send, refresh the table and close.
    ///
    /// Edits send only the fields that differ from the opened record. On any
    /// failure the form stays open with its draft intact.
    pub async fn submit(
        &mut self,
        api: &dyn EmployeeApi,
        table: &mut EmployeeTable,
    ) -> Result<Employee, FormError> {
        let employee = self.draft.parse().map_err(FormError::Invalid)?;

        let saved = match (self.mode, self.original.as_ref()) {
            (FormMode::Create, _) => api.create(employee).await?,
            (FormMode::Edit(employee_id), Some(original)) => {
                let changes = EmployeeChanges::between(original, &employee);
                api.update(employee_id, changes).await?
            }
            _ => return Err(FormError::NotOpen),
        };

        table.refresh(api).await;
        self.close();
        Ok(saved)
    }
}
