use sea_orm_migration::prelude::*;

use crate::columns::{
    nullable_timestamp, required_string, required_text, required_timestamp, uuid_pk, uuid_ref,
};
use crate::schema_change::SchemaChange;

pub const REVISION: &str = "03";
pub const DOWN_REVISION: Option<&str> = Some("02");

pub fn upgrade() -> Vec<SchemaChange> {
    vec![
        SchemaChange::create_table(
            Table::create()
                .table(Meetings::Table)
                .if_not_exists()
                .col(uuid_pk(Meetings::Id))
                .col(uuid_ref(Meetings::ProblemId))
                .col(required_string(Meetings::Topic))
                .col(nullable_timestamp(Meetings::ScheduledAt))
                .col(required_timestamp(Meetings::CreatedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_meetings_problem_id")
                        .from(Meetings::Table, Meetings::ProblemId)
                        .to(Problems::Table, Problems::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                ),
        ),
        SchemaChange::create_table(
            Table::create()
                .table(Messages::Table)
                .if_not_exists()
                .col(uuid_pk(Messages::Id))
                .col(uuid_ref(Messages::MeetingId))
                .col(required_string(Messages::Author))
                .col(required_text(Messages::Body))
                .col(required_timestamp(Messages::CreatedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_messages_meeting_id")
                        .from(Messages::Table, Messages::MeetingId)
                        .to(Meetings::Table, Meetings::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                ),
        ),
        SchemaChange::create_index(
            "idx_messages_meeting_created",
            Messages::Table,
            vec![Messages::MeetingId, Messages::CreatedAt],
        ),
    ]
}

pub fn downgrade() -> Vec<SchemaChange> {
    vec![
        SchemaChange::drop_index("idx_messages_meeting_created", Messages::Table),
        SchemaChange::drop_table(Messages::Table),
        SchemaChange::drop_table(Meetings::Table),
    ]
}

#[derive(DeriveIden)]
enum Meetings {
    Table,
    Id,
    ProblemId,
    Topic,
    ScheduledAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    MeetingId,
    Author,
    Body,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Problems {
    Table,
    Id,
}
