//! Warwatch Core - snapshot diffing and the poll-diff-notify cycle
//!
//! This crate provides the engine behind warwatch trackers:
//! - Open-ended feed records with canonical equality
//! - A generic keyed/positional diff engine
//! - A per-tracker snapshot store and notification rules
//! - The poll cycle controller driving fetch, diff, publish and update
//! - Source and sink traits at the external boundaries
//!
//! Transport, persistence and scheduling live in `warwatch-store` and
//! `warwatch-engine`.

pub mod catalog;
pub mod config;
pub mod diff;
pub mod errors;
pub mod feeds;
pub mod logging_facility;
pub mod notify;
pub mod poll;
pub mod record;
pub mod render;
pub mod shapes;
pub mod sink;
pub mod snapshot;
pub mod source;

// Used by the logging macros
pub use warwatch_core_types;

// Re-export commonly used types
pub use config::{FeedIdentities, TrackerConfig};
pub use diff::{diff_records, IdentityMode, RecordDiff};
pub use errors::{ExError, ExErrorKind, Result, WatchError};
pub use feeds::FeedKind;
pub use notify::{Notification, NotificationKind, Subject};
pub use poll::{run_tick, FeedOutcome, FeedReport, TickReport, Tracker};
pub use record::{FieldValue, Record};
pub use render::render_summary;
pub use sink::{CollectingSink, NotificationSink};
pub use snapshot::{Snapshot, SnapshotStore, TrackerState};
pub use source::{FeedEndpoints, FeedSource};
