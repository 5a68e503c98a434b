//! Revision generation: write a template, then hand it to the naming hook.

use std::fs;
use std::path::{Path, PathBuf};

use crate::naming::{latest_identifier, Identifier, NamingError};

/// Name the template is written under before the naming hook runs.
pub const PENDING_FILE_NAME: &str = "pending_revision.rs";

/// Default location of the revision scripts, relative to the migration crate.
pub const DEFAULT_REVISION_DIR: &str = "src/revisions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRevision {
    pub path: PathBuf,
    pub revision: Identifier,
    pub down_revision: Option<Identifier>,
}

/// Writes an empty revision that follows the current head of `dir` and runs
/// `hook` on it (normally [`crate::naming::assign_name`]).
pub fn generate_revision<F>(
    dir: &Path,
    raw_args: &[String],
    hook: F,
) -> Result<GeneratedRevision, NamingError>
where
    F: FnOnce(&Path, &[String]) -> Result<PathBuf, NamingError>,
{
    let down_revision = latest_identifier(dir)?;
    let revision = Identifier::after(down_revision)?;

    let pending = dir.join(PENDING_FILE_NAME);
    if pending.try_exists()? {
        return Err(NamingError::LeftoverPending(pending));
    }
    fs::write(&pending, render_template(revision, down_revision))?;
    tracing::debug!(path = %pending.display(), %revision, "Wrote revision template");

    let path = match hook(&pending, raw_args) {
        Ok(path) => path,
        Err(err) => {
            if let Err(cleanup) = fs::remove_file(&pending) {
                tracing::warn!(
                    path = %pending.display(),
                    "Could not remove revision template: {}",
                    cleanup
                );
            }
            return Err(err);
        }
    };
    Ok(GeneratedRevision {
        path,
        revision,
        down_revision,
    })
}

fn render_template(revision: Identifier, down_revision: Option<Identifier>) -> String {
    let down = match down_revision {
        Some(id) => format!("Some(\"{id}\")"),
        None => "None".to_owned(),
    };
    format!(
        r#"use crate::schema_change::SchemaChange;

pub const REVISION: &str = "{revision}";
pub const DOWN_REVISION: Option<&str> = {down};

pub fn upgrade() -> Vec<SchemaChange> {{
    vec![]
}}

pub fn downgrade() -> Vec<SchemaChange> {{
    vec![]
}}
"#
    )
}
