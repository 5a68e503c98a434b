use sea_orm_migration::prelude::*;

use crate::schema_change::SchemaChange;

pub const REVISION: &str = "07";
pub const DOWN_REVISION: Option<&str> = Some("06");

pub fn upgrade() -> Vec<SchemaChange> {
    vec![SchemaChange::create_index(
        "idx_problems_company_status",
        Problems::Table,
        vec![Problems::CompanyId, Problems::Status],
    )]
}

pub fn downgrade() -> Vec<SchemaChange> {
    vec![SchemaChange::drop_index(
        "idx_problems_company_status",
        Problems::Table,
    )]
}

#[derive(DeriveIden)]
enum Problems {
    Table,
    CompanyId,
    Status,
}
