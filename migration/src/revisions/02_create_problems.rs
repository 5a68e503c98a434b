use sea_orm_migration::prelude::*;

use crate::columns::{
    nullable_timestamp, required_string, required_text, required_timestamp, uuid_pk, uuid_ref,
};
use crate::schema_change::SchemaChange;

pub const REVISION: &str = "02";
pub const DOWN_REVISION: Option<&str> = Some("01");

pub fn upgrade() -> Vec<SchemaChange> {
    vec![
        SchemaChange::create_table(
            Table::create()
                .table(Problems::Table)
                .if_not_exists()
                .col(uuid_pk(Problems::Id))
                .col(uuid_ref(Problems::CompanyId))
                .col(required_string(Problems::Title))
                .col(required_text(Problems::Description))
                .col(required_string(Problems::Status))
                .col(required_timestamp(Problems::CreatedAt))
                .col(nullable_timestamp(Problems::UpdatedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_problems_company_id")
                        .from(Problems::Table, Problems::CompanyId)
                        .to(Companies::Table, Companies::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                ),
        ),
        SchemaChange::create_table(
            Table::create()
                .table(Comments::Table)
                .if_not_exists()
                .col(uuid_pk(Comments::Id))
                .col(uuid_ref(Comments::ProblemId))
                .col(required_string(Comments::Author))
                .col(required_text(Comments::Body))
                .col(required_timestamp(Comments::CreatedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_comments_problem_id")
                        .from(Comments::Table, Comments::ProblemId)
                        .to(Problems::Table, Problems::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                ),
        ),
        SchemaChange::create_table(
            Table::create()
                .table(Files::Table)
                .if_not_exists()
                .col(uuid_pk(Files::Id))
                .col(uuid_ref(Files::ProblemId))
                .col(required_string(Files::FileName))
                .col(required_string(Files::ContentType))
                .col(ColumnDef::new(Files::SizeBytes).big_integer().not_null())
                .col(required_timestamp(Files::CreatedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_files_problem_id")
                        .from(Files::Table, Files::ProblemId)
                        .to(Problems::Table, Problems::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                ),
        ),
        SchemaChange::create_index(
            "idx_problems_company_id",
            Problems::Table,
            vec![Problems::CompanyId],
        ),
    ]
}

pub fn downgrade() -> Vec<SchemaChange> {
    vec![
        SchemaChange::drop_index("idx_problems_company_id", Problems::Table),
        SchemaChange::drop_table(Files::Table),
        SchemaChange::drop_table(Comments::Table),
        SchemaChange::drop_table(Problems::Table),
    ]
}

#[derive(DeriveIden)]
enum Problems {
    Table,
    Id,
    CompanyId,
    Title,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    ProblemId,
    Author,
    Body,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Files {
    Table,
    Id,
    ProblemId,
    FileName,
    ContentType,
    SizeBytes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
}
