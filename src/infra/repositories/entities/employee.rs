//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Employee, EmployeeType};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Internal storage key, never exposed
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub employee_id: i64,
    pub full_name: String,
    pub initials: String,
    pub display_name: String,
    pub gender: String,
    pub date_of_birth: Date,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub mobile_number: String,
    pub designation: String,
    pub employee_type: String,
    pub experience: i32,
    pub joined_date: Date,
    #[sea_orm(column_type = "Double")]
    pub salary: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub personal_notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for Employee {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let employee_type: EmployeeType = model.employee_type.parse().map_err(|e| {
            AppError::internal(format!(
                "employee {} has corrupt type: {}",
                model.employee_id, e
            ))
        })?;

        Ok(Employee {
            employee_id: model.employee_id,
            full_name: model.full_name,
            initials: model.initials,
            display_name: model.display_name,
            gender: model.gender,
            date_of_birth: model.date_of_birth,
            email: model.email,
            mobile_number: model.mobile_number,
            designation: model.designation,
            employee_type,
            experience: model.experience,
            joined_date: model.joined_date,
            salary: model.salary,
            personal_notes: model.personal_notes,
        })
    }
}
