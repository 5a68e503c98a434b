use sea_orm_migration::prelude::*;

use crate::schema_change::SchemaChange;

pub const REVISION: &str = "05";
pub const DOWN_REVISION: Option<&str> = Some("04");

pub fn upgrade() -> Vec<SchemaChange> {
    vec![SchemaChange::add_unique_constraint(
        "uq_votes_survey_voter",
        Votes::Table,
        vec![Votes::SurveyId, Votes::Voter],
    )]
}

pub fn downgrade() -> Vec<SchemaChange> {
    vec![SchemaChange::drop_index("uq_votes_survey_voter", Votes::Table)]
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    SurveyId,
    Voter,
}
