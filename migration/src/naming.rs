//! Sequential revision identifiers and file naming.
//!
//! A freshly generated revision file is renamed to `NN_description.ext`,
//! where `NN` is one more than the highest numeric prefix already present in
//! the revisions directory and `description` is the normalized `-m` text the
//! developer supplied.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Description used when the invocation carries no usable `-m` value.
pub const DEFAULT_DESCRIPTION: &str = "auto_migration";

#[derive(Debug, thiserror::Error)]
pub enum NamingError {
    #[error("failed to access revision directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("revision file `{}` already exists", .0.display())]
    Collision(PathBuf),
    #[error("generated file `{}` has no extension", .0.display())]
    MissingExtension(PathBuf),
    #[error("generated file `{}` has no parent directory", .0.display())]
    MissingParent(PathBuf),
    #[error("`{}` is left over from an earlier run; delete it and retry", .0.display())]
    LeftoverPending(PathBuf),
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
    #[error("revision {0} is the largest representable identifier")]
    Exhausted(Identifier),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid revision identifier `{0}`")]
pub struct InvalidIdentifier(pub String);

/// Sequential revision number.
///
/// Displayed zero-padded to at least two digits. Comparisons are numeric, so
/// `100` sorts after `99` even though its rendering is wider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(u32);

impl Identifier {
    pub const FIRST: Identifier = Identifier(1);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Identifier that follows `latest`, or [`Identifier::FIRST`] when there
    /// is none.
    pub fn after(latest: Option<Self>) -> Result<Self, NamingError> {
        match latest {
            None => Ok(Self::FIRST),
            Some(id) => id.next().ok_or(NamingError::Exhausted(id)),
        }
    }

    /// Parses the leading run of ASCII digits of `name`.
    ///
    /// `Ok(None)` when `name` does not start with a digit; an error when the
    /// digits do not fit an identifier.
    pub fn from_prefix(name: &str) -> Result<Option<Self>, InvalidIdentifier> {
        let end = name
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(name.len(), |(idx, _)| idx);
        match &name[..end] {
            "" => Ok(None),
            digits => digits
                .parse()
                .map(|value| Some(Self(value)))
                .map_err(|_| InvalidIdentifier(name.to_owned())),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidIdentifier(s.to_owned()));
        }
        s.parse()
            .map(Self)
            .map_err(|_| InvalidIdentifier(s.to_owned()))
    }
}

/// Highest identifier among the files in `dir`, ignoring names without a
/// numeric prefix.
pub fn latest_identifier(dir: &Path) -> Result<Option<Identifier>, NamingError> {
    scan_directory(dir, None)
}

/// Identifier the next revision created in `dir` will receive.
pub fn next_identifier(dir: &Path) -> Result<Identifier, NamingError> {
    Identifier::after(latest_identifier(dir)?)
}

fn scan_directory(dir: &Path, skip: Option<&OsStr>) -> Result<Option<Identifier>, NamingError> {
    let mut latest = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if Some(file_name.as_os_str()) == skip {
            continue;
        }
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(identifier) = Identifier::from_prefix(name)? else {
            continue;
        };
        latest = latest.max(Some(identifier));
    }
    Ok(latest)
}

/// Extracts the `-m` / `--message` value from the raw invocation arguments
/// and normalizes it into a file-name fragment.
///
/// The result only contains `[a-z0-9_]`, never starts or ends with `_` and
/// never contains `__`. Falls back to [`DEFAULT_DESCRIPTION`].
pub fn normalize_description(raw_args: &[String]) -> String {
    let normalized = description_arg(raw_args)
        .map(normalize_text)
        .unwrap_or_default();
    if normalized.is_empty() {
        DEFAULT_DESCRIPTION.to_owned()
    } else {
        normalized
    }
}

fn description_arg(raw_args: &[String]) -> Option<&str> {
    let mut args = raw_args.iter();
    while let Some(arg) = args.next() {
        if arg == "-m" || arg == "--message" {
            return args.next().map(String::as_str);
        }
        if let Some(value) = arg.strip_prefix("--message=") {
            return Some(value);
        }
        if let Some(value) = arg.strip_prefix("-m") {
            if !value.is_empty() {
                return Some(value.strip_prefix('=').unwrap_or(value));
            }
        }
    }
    None
}

fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '_'
        };
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Renames a freshly generated revision file to `NN_description.ext` in the
/// same directory and returns the final path.
///
/// The artifact itself is excluded from the identifier scan. An existing
/// destination is never overwritten.
pub fn assign_name(artifact: &Path, raw_args: &[String]) -> Result<PathBuf, NamingError> {
    let dir = match artifact.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Err(NamingError::MissingParent(artifact.to_path_buf())),
    };
    let extension = artifact
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| NamingError::MissingExtension(artifact.to_path_buf()))?;

    let identifier = Identifier::after(scan_directory(dir, artifact.file_name())?)?;
    let description = normalize_description(raw_args);
    let destination = dir.join(format!("{identifier}_{description}.{extension}"));

    if destination.try_exists()? {
        return Err(NamingError::Collision(destination));
    }
    fs::rename(artifact, &destination)?;
    tracing::info!(
        from = %artifact.display(),
        to = %destination.display(),
        "Assigned revision name"
    );
    Ok(destination)
}
