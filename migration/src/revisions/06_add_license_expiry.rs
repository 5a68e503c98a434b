use sea_orm_migration::prelude::*;

use crate::columns::nullable_timestamp;
use crate::schema_change::SchemaChange;

pub const REVISION: &str = "06";
pub const DOWN_REVISION: Option<&str> = Some("05");

pub fn upgrade() -> Vec<SchemaChange> {
    vec![SchemaChange::add_column(
        Licenses::Table,
        nullable_timestamp(Licenses::ExpiresAt),
    )]
}

pub fn downgrade() -> Vec<SchemaChange> {
    vec![SchemaChange::drop_column(Licenses::Table, Licenses::ExpiresAt)]
}

#[derive(DeriveIden)]
enum Licenses {
    Table,
    ExpiresAt,
}
