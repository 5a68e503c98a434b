//! Reusable column definitions shared by the revision scripts.

use sea_orm_migration::prelude::*;

/// Non-null UUID primary key.
pub fn uuid_pk<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column).uuid().not_null().primary_key().to_owned()
}

/// Non-null UUID column referencing another table.
pub fn uuid_ref<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column).uuid().not_null().to_owned()
}

pub fn required_string<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column).string().not_null().to_owned()
}

pub fn required_text<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column).text().not_null().to_owned()
}

pub fn required_timestamp<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

pub fn nullable_timestamp<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .null()
        .to_owned()
}
