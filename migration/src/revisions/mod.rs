//! Revision scripts, one file per revision, named `NN_description.rs`.
//!
//! `migration revision -m "..."` writes a new file here; register it below.

use crate::chain::{ChainError, Revision, RevisionChain};

#[path = "01_create_companies_and_licenses.rs"]
mod r01_create_companies_and_licenses;
#[path = "02_create_problems.rs"]
mod r02_create_problems;
#[path = "03_create_meetings.rs"]
mod r03_create_meetings;
#[path = "04_create_surveys.rs"]
mod r04_create_surveys;
#[path = "05_add_unique_vote_per_voter.rs"]
mod r05_add_unique_vote_per_voter;
#[path = "06_add_license_expiry.rs"]
mod r06_add_license_expiry;
#[path = "07_add_problem_status_index.rs"]
mod r07_add_problem_status_index;

macro_rules! revision {
    ($module:ident, $name:literal) => {
        Revision::from_script(
            $name,
            $module::REVISION,
            $module::DOWN_REVISION,
            $module::upgrade,
            $module::downgrade,
        )
    };
}

pub fn registry() -> Result<Vec<Revision>, ChainError> {
    [
        revision!(r01_create_companies_and_licenses, "01_create_companies_and_licenses"),
        revision!(r02_create_problems, "02_create_problems"),
        revision!(r03_create_meetings, "03_create_meetings"),
        revision!(r04_create_surveys, "04_create_surveys"),
        revision!(r05_add_unique_vote_per_voter, "05_add_unique_vote_per_voter"),
        revision!(r06_add_license_expiry, "06_add_license_expiry"),
        revision!(r07_add_problem_status_index, "07_add_problem_status_index"),
    ]
    .into_iter()
    .collect()
}

pub fn chain() -> Result<RevisionChain, ChainError> {
    RevisionChain::build(registry()?)
}
