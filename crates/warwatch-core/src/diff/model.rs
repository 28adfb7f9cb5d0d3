//! Diff output types.

use serde::{Deserialize, Serialize};

use crate::record::{FieldValue, Record};

/// How records are paired between two polls of one feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IdentityMode {
    /// Pair records by index in the ordered collection
    Positional,
    /// Pair records by the value of an explicit key field
    Keyed { key: String },
}

impl IdentityMode {
    pub fn keyed(key: impl Into<String>) -> Self {
        IdentityMode::Keyed { key: key.into() }
    }
}

/// Identity under which a changed record was paired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identity {
    /// Index in both collections
    Index(usize),
    /// Canonical form of the key field value
    Key(String),
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identity::Index(i) => write!(f, "#{}", i),
            Identity::Key(k) => f.write_str(k),
        }
    }
}

/// Old/new values of one differing field.
///
/// `None` means the field is absent on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub old: Option<FieldValue>,
    pub new: Option<FieldValue>,
}

/// A record whose identity exists in both collections with different content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordChange {
    pub identity: Identity,
    pub before: Record,
    pub after: Record,
    /// Differing fields, in `before` field order followed by fields only in `after`
    pub changed_fields: Vec<FieldChange>,
}

impl RecordChange {
    pub fn field_names(&self) -> Vec<&str> {
        self.changed_fields.iter().map(|c| c.field.as_str()).collect()
    }
}

/// The three disjoint groups produced by one diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDiff {
    /// Records present only in the new collection, in new order
    pub additions: Vec<Record>,
    /// Records present only in the old collection, in old order
    pub removals: Vec<Record>,
    /// Paired records with differing content, in new order
    pub changes: Vec<RecordChange>,
}

impl RecordDiff {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty() && self.changes.is_empty()
    }

    /// Total number of entries over all three groups.
    pub fn len(&self) -> usize {
        self.additions.len() + self.removals.len() + self.changes.len()
    }
}
