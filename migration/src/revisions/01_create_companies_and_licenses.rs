use sea_orm_migration::prelude::*;

use crate::columns::{nullable_timestamp, required_string, required_timestamp, uuid_pk, uuid_ref};
use crate::schema_change::SchemaChange;

pub const REVISION: &str = "01";
pub const DOWN_REVISION: Option<&str> = None;

pub fn upgrade() -> Vec<SchemaChange> {
    vec![
        SchemaChange::create_table(
            Table::create()
                .table(Companies::Table)
                .if_not_exists()
                .col(uuid_pk(Companies::Id))
                .col(required_string(Companies::Name).unique_key())
                .col(required_timestamp(Companies::CreatedAt))
                .col(nullable_timestamp(Companies::UpdatedAt)),
        ),
        SchemaChange::create_table(
            Table::create()
                .table(Licenses::Table)
                .if_not_exists()
                .col(uuid_pk(Licenses::Id))
                .col(uuid_ref(Licenses::CompanyId))
                .col(required_string(Licenses::Name))
                .col(required_timestamp(Licenses::CreatedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_licenses_company_id")
                        .from(Licenses::Table, Licenses::CompanyId)
                        .to(Companies::Table, Companies::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                ),
        ),
        SchemaChange::create_index(
            "idx_licenses_company_id",
            Licenses::Table,
            vec![Licenses::CompanyId],
        ),
        SchemaChange::create_index("idx_licenses_name", Licenses::Table, vec![Licenses::Name]),
    ]
}

pub fn downgrade() -> Vec<SchemaChange> {
    vec![
        SchemaChange::drop_index("idx_licenses_name", Licenses::Table),
        SchemaChange::drop_index("idx_licenses_company_id", Licenses::Table),
        SchemaChange::drop_table(Licenses::Table),
        SchemaChange::drop_table(Companies::Table),
    ]
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Licenses {
    Table,
    Id,
    CompanyId,
    Name,
    CreatedAt,
}
