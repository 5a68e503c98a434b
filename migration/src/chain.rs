//! Linear revision history: validation, ordering and path planning.

use std::collections::BTreeMap;
use std::fmt;

use crate::naming::{Identifier, InvalidIdentifier};
use crate::schema_change::SchemaChange;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
    #[error("revision {0} is registered more than once")]
    DuplicateRevision(Identifier),
    #[error("revision name `{name}` does not start with `{revision}_`")]
    NameMismatch {
        name: &'static str,
        revision: Identifier,
    },
    #[error("revisions {0} and {1} both declare no predecessor")]
    MultipleRoots(Identifier, Identifier),
    #[error("revision {revision} points at unknown predecessor {predecessor}")]
    UnknownPredecessor {
        revision: Identifier,
        predecessor: Identifier,
    },
    #[error("revisions {first} and {second} both follow {parent}")]
    Branch {
        parent: Identifier,
        first: Identifier,
        second: Identifier,
    },
    #[error("revision {revision} declares predecessor {predecessor}, which was not created before it")]
    OutOfOrder {
        revision: Identifier,
        predecessor: Identifier,
    },
    #[error("unknown revision {0}")]
    UnknownRevision(Identifier),
}

/// A registered revision script.
#[derive(Debug, Clone, Copy)]
pub struct Revision {
    /// File stem, `NN_description`.
    pub name: &'static str,
    pub revision: Identifier,
    pub down_revision: Option<Identifier>,
    pub upgrade: fn() -> Vec<SchemaChange>,
    pub downgrade: fn() -> Vec<SchemaChange>,
}

impl Revision {
    /// Builds a revision from the constants a revision file exports.
    pub fn from_script(
        name: &'static str,
        revision: &str,
        down_revision: Option<&str>,
        upgrade: fn() -> Vec<SchemaChange>,
        downgrade: fn() -> Vec<SchemaChange>,
    ) -> Result<Self, ChainError> {
        Ok(Self {
            name,
            revision: revision.parse()?,
            down_revision: down_revision.map(str::parse).transpose()?,
            upgrade,
            downgrade,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Upgrade,
    Downgrade,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Upgrade => f.write_str("upgrade"),
            Direction::Downgrade => f.write_str("downgrade"),
        }
    }
}

/// One revision applied in one direction.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub direction: Direction,
    pub revision: Revision,
}

impl Step {
    pub fn changes(&self) -> Vec<SchemaChange> {
        match self.direction {
            Direction::Upgrade => (self.revision.upgrade)(),
            Direction::Downgrade => (self.revision.downgrade)(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction, self.revision.name)
    }
}

/// Revisions ordered root first.
#[derive(Debug, Clone, Default)]
pub struct RevisionChain {
    ordered: Vec<Revision>,
}

impl RevisionChain {
    /// Validates that `revisions` form a single unbranched history in which
    /// every predecessor has a lower identifier than its child, and orders
    /// them root first.
    ///
    /// With predecessors strictly older, the only valid history is the
    /// ascending identifier order with each revision pointing at the one
    /// just before it.
    pub fn build(revisions: Vec<Revision>) -> Result<Self, ChainError> {
        let mut by_id = BTreeMap::new();
        for revision in revisions {
            let id = revision.revision;
            if !revision.name.starts_with(&format!("{id}_")) {
                return Err(ChainError::NameMismatch {
                    name: revision.name,
                    revision: id,
                });
            }
            if by_id.insert(id, revision).is_some() {
                return Err(ChainError::DuplicateRevision(id));
            }
        }

        let ordered: Vec<Revision> = by_id.into_values().collect();
        for (idx, revision) in ordered.iter().enumerate() {
            let id = revision.revision;
            let expected = idx.checked_sub(1).map(|prev| ordered[prev].revision);
            if revision.down_revision == expected {
                continue;
            }

            let Some(parent) = revision.down_revision else {
                return Err(ChainError::MultipleRoots(ordered[0].revision, id));
            };
            if parent >= id {
                return Err(ChainError::OutOfOrder {
                    revision: id,
                    predecessor: parent,
                });
            }
            return Err(
                match ordered[..idx].iter().position(|r| r.revision == parent) {
                    // Not the immediate predecessor, so `pos + 1 < idx`.
                    Some(pos) => ChainError::Branch {
                        parent,
                        first: ordered[pos + 1].revision,
                        second: id,
                    },
                    None => ChainError::UnknownPredecessor {
                        revision: id,
                        predecessor: parent,
                    },
                },
            );
        }

        Ok(Self { ordered })
    }

    pub fn revisions(&self) -> &[Revision] {
        &self.ordered
    }

    pub fn head(&self) -> Option<Identifier> {
        self.ordered.last().map(|r| r.revision)
    }

    // Number of revisions applied when `at` is the current revision.
    fn depth(&self, at: Option<Identifier>) -> Result<usize, ChainError> {
        match at {
            None => Ok(0),
            Some(id) => self
                .ordered
                .iter()
                .position(|r| r.revision == id)
                .map(|idx| idx + 1)
                .ok_or(ChainError::UnknownRevision(id)),
        }
    }

    /// Steps that move the schema from `from` to `to`; `None` is the base
    /// (nothing applied).
    pub fn path(
        &self,
        from: Option<Identifier>,
        to: Option<Identifier>,
    ) -> Result<Vec<Step>, ChainError> {
        let start = self.depth(from)?;
        let end = self.depth(to)?;

        let steps = if end >= start {
            self.ordered[start..end]
                .iter()
                .map(|revision| Step {
                    direction: Direction::Upgrade,
                    revision: *revision,
                })
                .collect()
        } else {
            self.ordered[end..start]
                .iter()
                .rev()
                .map(|revision| Step {
                    direction: Direction::Downgrade,
                    revision: *revision,
                })
                .collect()
        };
        Ok(steps)
    }
}
