//! Employee domain entity and related types.

use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MOBILE_NUMBER_PATTERN};
use crate::types::{PaginationParams, SortOrder};

static MOBILE_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(MOBILE_NUMBER_PATTERN).expect("mobile number pattern is valid"));

/// Kind of employment contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EmployeeType {
    #[serde(rename = "Full-time", alias = "Full time")]
    FullTime,
    #[serde(rename = "Part-time", alias = "Part time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
}

impl EmployeeType {
    pub const ALL: [EmployeeType; 3] = [
        EmployeeType::FullTime,
        EmployeeType::PartTime,
        EmployeeType::Contract,
    ];

    /// Stored and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeType::FullTime => "Full-time",
            EmployeeType::PartTime => "Part-time",
            EmployeeType::Contract => "Contract",
        }
    }
}

impl std::fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full-time" | "Full time" => Ok(EmployeeType::FullTime),
            "Part-time" | "Part time" => Ok(EmployeeType::PartTime),
            "Contract" => Ok(EmployeeType::Contract),
            other => Err(format!("Unknown employee type: {}", other)),
        }
    }
}

/// Employee domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Server-assigned sequential identifier
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "J.D.")]
    pub initials: String,
    #[schema(example = "John")]
    pub display_name: String,
    #[schema(example = "Male")]
    pub gender: String,
    pub date_of_birth: NaiveDate,
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    #[schema(example = "0712345678")]
    pub mobile_number: String,
    #[schema(example = "Senior Developer")]
    pub designation: String,
    pub employee_type: EmployeeType,
    /// Years of experience
    #[schema(example = 3)]
    pub experience: i32,
    pub joined_date: NaiveDate,
    #[schema(example = 450000.0)]
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_notes: Option<String>,
}

impl Employee {
    /// Build the stored record for a freshly assigned id
    pub fn from_new(employee_id: i64, new: NewEmployee) -> Self {
        Self {
            employee_id,
            full_name: new.full_name,
            initials: new.initials,
            display_name: new.display_name,
            gender: new.gender,
            date_of_birth: new.date_of_birth,
            email: new.email,
            mobile_number: new.mobile_number,
            designation: new.designation,
            employee_type: new.employee_type,
            experience: new.experience,
            joined_date: new.joined_date,
            salary: new.salary,
            personal_notes: new.personal_notes.filter(|n| !n.is_empty()),
        }
    }

    /// Apply a partial change set in place
    pub fn apply(&mut self, changes: EmployeeChanges) {
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

        if let Some(v) = full_name {
            self.full_name = v;
        }
        if let Some(v) = initials {
            self.initials = v;
        }
        if let Some(v) = display_name {
            self.display_name = v;
        }
        if let Some(v) = gender {
            self.gender = v;
        }
        if let Some(v) = date_of_birth {
            self.date_of_birth = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = mobile_number {
            self.mobile_number = v;
        }
        if let Some(v) = designation {
            self.designation = v;
        }
        if let Some(v) = employee_type {
            self.employee_type = v;
        }
        if let Some(v) = experience {
            self.experience = v;
        }
        if let Some(v) = joined_date {
            self.joined_date = v;
        }
        if let Some(v) = salary {
            self.salary = v;
        }
        if let Some(v) = personal_notes {
            // An empty string clears the notes
            self.personal_notes = Some(v).filter(|n| !n.is_empty());
        }
    }
}

/// Employee creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 100, message = "Full name is required (max 100 characters)"))]
    #[schema(example = "John Doe", max_length = 100)]
    pub full_name: String,
    #[validate(length(min = 1, max = 20, message = "Initials are required (max 20 characters)"))]
    #[schema(example = "J.D.", max_length = 20)]
    pub initials: String,
    #[validate(length(min = 1, max = 50, message = "Display name is required (max 50 characters)"))]
    #[schema(example = "John", max_length = 50)]
    pub display_name: String,
    #[validate(length(min = 1, message = "Gender is required"))]
    #[schema(example = "Male")]
    pub gender: String,
    #[schema(example = "1990-01-01")]
    pub date_of_birth: NaiveDate,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    #[validate(regex(path = *MOBILE_NUMBER_REGEX, message = "Mobile number must be a valid 10 digit number"))]
    #[schema(example = "0712345678")]
    pub mobile_number: String,
    #[validate(length(min = 1, max = 50, message = "Designation is required (max 50 characters)"))]
    #[schema(example = "Senior Developer", max_length = 50)]
    pub designation: String,
    pub employee_type: EmployeeType,
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    #[schema(example = 3)]
    pub experience: i32,
    #[schema(example = "2020-02-10")]
    pub joined_date: NaiveDate,
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    #[schema(example = 450000.0)]
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Lorem ipsum dolor sit amet consectetur.")]
    pub personal_notes: Option<String>,
}

/// Partial employee update; absent fields stay untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeeChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Full name cannot be empty (max 100 characters)"))]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20, message = "Initials cannot be empty (max 20 characters)"))]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "Display name cannot be empty (max 50 characters)"))]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Gender cannot be empty"))]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *MOBILE_NUMBER_REGEX, message = "Mobile number must be a valid 10 digit number"))]
    pub mobile_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "Designation cannot be empty (max 50 characters)"))]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_type: Option<EmployeeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary: Option<f64>,
    /// Empty string clears the notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_notes: Option<String>,
}

impl EmployeeChanges {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fields of `updated` that differ from `original`
    pub fn between(original: &Employee, updated: &NewEmployee) -> Self {
        fn changed<T: PartialEq + Clone>(old: &T, new: &T) -> Option<T> {
            (old != new).then(|| new.clone())
        }

        let old_notes = original.personal_notes.clone().unwrap_or_default();
        let new_notes = updated.personal_notes.clone().unwrap_or_default();

        Self {
            full_name: changed(&original.full_name, &updated.full_name),
            initials: changed(&original.initials, &updated.initials),
            display_name: changed(&original.display_name, &updated.display_name),
            gender: changed(&original.gender, &updated.gender),
            date_of_birth: changed(&original.date_of_birth, &updated.date_of_birth),
            email: changed(&original.email, &updated.email),
            mobile_number: changed(&original.mobile_number, &updated.mobile_number),
            designation: changed(&original.designation, &updated.designation),
            employee_type: changed(&original.employee_type, &updated.employee_type),
            experience: changed(&original.experience, &updated.experience),
            joined_date: changed(&original.joined_date, &updated.joined_date),
            salary: changed(&original.salary, &updated.salary),
            personal_notes: changed(&old_notes, &new_notes),
        }
    }
}

/// Employee field usable as a sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeSortField {
    EmployeeId,
    FullName,
    Initials,
    DisplayName,
    Gender,
    DateOfBirth,
    Email,
    MobileNumber,
    Designation,
    EmployeeType,
    Experience,
    JoinedDate,
    Salary,
}

/// List query: filter, page window, and ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeListParams {
    /// Filter by employee type (exact match)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<String>, example = "Full-time")]
    pub employee_type: Option<EmployeeType>,
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(example = 1)]
    pub page: u64,
    /// Number of items per page
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    #[param(example = 5)]
    pub limit: u64,
    /// Field to sort by; natural order when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[param(value_type = Option<String>, example = "fullName")]
    pub sort_by: Option<EmployeeSortField>,
    /// Sort direction
    #[serde(default)]
    #[param(value_type = Option<String>, example = "asc")]
    pub sort_order: SortOrder,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for EmployeeListParams {
    fn default() -> Self {
        Self {
            employee_type: None,
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: SortOrder::Asc,
        }
    }
}

impl EmployeeListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.limit)
    }
}

/// One page of the employee listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    #[schema(example = 2)]
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee() -> NewEmployee {
        NewEmployee {
            full_name: "John Doe".to_string(),
            initials: "J.D.".to_string(),
            display_name: "John".to_string(),
            gender: "Male".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            email: "john.doe@example.com".to_string(),
            mobile_number: "0712345678".to_string(),
            designation: "Senior Developer".to_string(),
            employee_type: EmployeeType::FullTime,
            experience: 3,
            joined_date: NaiveDate::from_ymd_opt(2020, 2, 10).unwrap(),
            salary: 450000.0,
            personal_notes: None,
        }
    }

    #[test]
    fn valid_employee_passes_validation() {
        assert!(new_employee().validate().is_ok());
    }

    #[test]
    fn mobile_number_must_be_ten_digits() {
        for bad in ["12345", "07123456789", "07123x5678", ""] {
            let mut employee = new_employee();
            employee.mobile_number = bad.to_string();
            let errors = employee.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("mobile_number"), "{bad}");
        }
    }

    #[test]
    fn rejects_bad_email_and_overlong_names() {
        let mut employee = new_employee();
        employee.email = "not-an-email".to_string();
        employee.initials = "X".repeat(21);
        let errors = employee.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("initials"));
    }

    #[test]
    fn rejects_negative_experience_and_salary() {
        let mut employee = new_employee();
        employee.experience = -1;
        employee.salary = -0.5;
        let errors = employee.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("experience"));
        assert!(fields.contains_key("salary"));
    }

    #[test]
    fn employee_type_accepts_spaced_aliases() {
        let parsed: EmployeeType = serde_json::from_str("\"Full time\"").unwrap();
        assert_eq!(parsed, EmployeeType::FullTime);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Full-time\"");
        assert_eq!("Part time".parse::<EmployeeType>(), Ok(EmployeeType::PartTime));
        assert!("Intern".parse::<EmployeeType>().is_err());
    }

    #[test]
    fn new_employee_rejects_client_supplied_id() {
        let mut value = serde_json::to_value(new_employee()).unwrap();
        value["employeeId"] = serde_json::json!(99);
        assert!(serde_json::from_value::<NewEmployee>(value).is_err());
    }

    #[test]
    fn apply_changes_only_provided_fields() {
        let mut employee = Employee::from_new(1, new_employee());
        let before = employee.clone();
        employee.apply(EmployeeChanges {
            designation: Some("Lead Developer".to_string()),
            ..Default::default()
        });

        assert_eq!(employee.designation, "Lead Developer");
        assert_eq!(employee.full_name, before.full_name);
        assert_eq!(employee.email, before.email);
        assert_eq!(employee.employee_id, 1);
    }

    #[test]
    fn empty_notes_clear_existing_notes() {
        let mut employee = Employee::from_new(1, NewEmployee {
            personal_notes: Some("likes tea".to_string()),
            ..new_employee()
        });
        employee.apply(EmployeeChanges {
            personal_notes: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(employee.personal_notes, None);
    }

    #[test]
    fn changes_between_lists_only_differences() {
        let original = Employee::from_new(4, new_employee());
        let mut edited = new_employee();
        edited.salary = 500000.0;
        edited.employee_type = EmployeeType::Contract;

        let changes = EmployeeChanges::between(&original, &edited);
        assert_eq!(changes.salary, Some(500000.0));
        assert_eq!(changes.employee_type, Some(EmployeeType::Contract));
        assert_eq!(changes.full_name, None);
        assert_eq!(changes.personal_notes, None);
        assert!(EmployeeChanges::between(&original, &new_employee()).is_empty());
    }

    #[test]
    fn list_params_default_to_first_page_of_five() {
        let params: EmployeeListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, EmployeeListParams::default());
        assert_eq!(params.pagination(), PaginationParams::new(1, 5));
    }

    #[test]
    fn list_params_reject_zero_page_and_limit() {
        let params = EmployeeListParams {
            page: 0,
            limit: 0,
            ..Default::default()
        };
        let errors = params.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("page"));
        assert!(errors.field_errors().contains_key("limit"));
    }
}
