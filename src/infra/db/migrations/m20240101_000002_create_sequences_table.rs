//! Migration: Create the sequences table and seed the employee id counter.

use sea_orm_migration::prelude::*;

use crate::config::EMPLOYEE_ID_SEQUENCE;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sequences::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sequences::Name).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(Sequences::Value).big_integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        // Counter starts at zero so the first employee gets id 1
        let seed = Query::insert()
            .into_table(Sequences::Table)
            .columns([Sequences::Name, Sequences::Value])
            .values_panic([EMPLOYEE_ID_SEQUENCE.into(), 0i64.into()])
            .to_owned();

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sequences::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sequences {
    Table,
    Name,
    Value,
}
