//! Migration: Create employees table with its unique indexes.

use sea_orm_migration::prelude::*;

use crate::config::{
    MAX_DESIGNATION_LENGTH, MAX_DISPLAY_NAME_LENGTH, MAX_FULL_NAME_LENGTH, MAX_INITIALS_LENGTH,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Employees::EmployeeId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::FullName)
                            .string_len(MAX_FULL_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::Initials)
                            .string_len(MAX_INITIALS_LENGTH)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::DisplayName)
                            .string_len(MAX_DISPLAY_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Gender).string().not_null())
                    .col(ColumnDef::new(Employees::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Employees::Email).string().not_null())
                    .col(ColumnDef::new(Employees::MobileNumber).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Employees::Designation)
                            .string_len(MAX_DESIGNATION_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::EmployeeType).string_len(16).not_null())
                    .col(ColumnDef::new(Employees::Experience).integer().not_null())
                    .col(ColumnDef::new(Employees::JoinedDate).date().not_null())
                    .col(ColumnDef::new(Employees::Salary).double().not_null())
                    .col(ColumnDef::new(Employees::PersonalNotes).text().null())
                    .to_owned(),
            )
            .await?;

        // Uniqueness is enforced here; a violation surfaces as a duplicate error
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_email")
                    .table(Employees::Table)
                    .col(Employees::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_mobile_number")
                    .table(Employees::Table)
                    .col(Employees::MobileNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_employee_type")
                    .table(Employees::Table)
                    .col(Employees::EmployeeType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
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
    PersonalNotes,
}
