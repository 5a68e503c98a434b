use sea_orm_migration::prelude::*;

use crate::columns::{nullable_timestamp, required_string, required_timestamp, uuid_pk, uuid_ref};
use crate::schema_change::SchemaChange;

pub const REVISION: &str = "04";
pub const DOWN_REVISION: Option<&str> = Some("03");

pub fn upgrade() -> Vec<SchemaChange> {
    vec![
        SchemaChange::create_table(
            Table::create()
                .table(Surveys::Table)
                .if_not_exists()
                .col(uuid_pk(Surveys::Id))
                .col(uuid_ref(Surveys::MeetingId))
                .col(required_string(Surveys::Question))
                .col(required_timestamp(Surveys::CreatedAt))
                .col(nullable_timestamp(Surveys::ClosedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_surveys_meeting_id")
                        .from(Surveys::Table, Surveys::MeetingId)
                        .to(Meetings::Table, Meetings::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                ),
        ),
        SchemaChange::create_table(
            Table::create()
                .table(Votes::Table)
                .if_not_exists()
                .col(uuid_pk(Votes::Id))
                .col(uuid_ref(Votes::SurveyId))
                .col(required_string(Votes::Voter))
                .col(ColumnDef::new(Votes::Choice).integer().not_null())
                .col(required_timestamp(Votes::CreatedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_votes_survey_id")
                        .from(Votes::Table, Votes::SurveyId)
                        .to(Surveys::Table, Surveys::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                ),
        ),
    ]
}

pub fn downgrade() -> Vec<SchemaChange> {
    vec![
        SchemaChange::drop_table(Votes::Table),
        SchemaChange::drop_table(Surveys::Table),
    ]
}

#[derive(DeriveIden)]
enum Surveys {
    Table,
    Id,
    MeetingId,
    Question,
    CreatedAt,
    ClosedAt,
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    Id,
    SurveyId,
    Voter,
    Choice,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Meetings {
    Table,
    Id,
}
