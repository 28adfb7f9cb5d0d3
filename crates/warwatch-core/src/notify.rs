//! Notification rules: what to emit for each diff entry.

use serde::{Deserialize, Serialize};

use crate::diff::{FieldChange, Identity, RecordDiff};
use crate::feeds::FeedKind;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Added,
    Removed,
    Changed,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Added => "added",
            NotificationKind::Removed => "removed",
            NotificationKind::Changed => "changed",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a notification is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Subject {
    /// A record that was added or removed
    Record { record: Record },
    /// A record whose content changed, with only the differing fields listed
    Change {
        identity: Identity,
        before: Record,
        after: Record,
        changed_fields: Vec<FieldChange>,
    },
    /// A scalar feed value that moved
    Scalar { before: i64, after: i64 },
}

/// One structured change notification handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub feed: FeedKind,
    /// Source identifier of the tracker (e.g. `live`)
    pub api_type: String,
    pub subject: Subject,
}

impl Notification {
    /// Names of the differing fields; empty unless the subject is a change.
    pub fn changed_field_names(&self) -> Vec<&str> {
        match &self.subject {
            Subject::Change { changed_fields, .. } => {
                changed_fields.iter().map(|c| c.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Turn one diff into notifications.
///
/// Order is all additions, then all removals, then all changes. Each group
/// keeps the order the diff reported it in.
pub fn notifications_for_diff(feed: FeedKind, api_type: &str, diff: &RecordDiff) -> Vec<Notification> {
    let make = |kind, subject| Notification {
        kind,
        feed,
        api_type: api_type.to_string(),
        subject,
    };

    let added = diff.additions.iter().map(|record| {
        make(
            NotificationKind::Added,
            Subject::Record {
                record: record.clone(),
            },
        )
    });
    let removed = diff.removals.iter().map(|record| {
        make(
            NotificationKind::Removed,
            Subject::Record {
                record: record.clone(),
            },
        )
    });
    let changed = diff.changes.iter().map(|change| {
        make(
            NotificationKind::Changed,
            Subject::Change {
                identity: change.identity.clone(),
                before: change.before.clone(),
                after: change.after.clone(),
                changed_fields: change.changed_fields.clone(),
            },
        )
    });

    added.chain(removed).chain(changed).collect()
}

/// A changed notification for the story beat, or `None` when it did not move.
pub fn story_beat_notification(api_type: &str, before: i64, after: i64) -> Option<Notification> {
    (before != after).then(|| Notification {
        kind: NotificationKind::Changed,
        feed: FeedKind::StoryBeat,
        api_type: api_type.to_string(),
        subject: Subject::Scalar { before, after },
    })
}
