//! Snapshot diff engine.
//!
//! Compares two ordered collections of feed records and reports which
//! records were added, removed, or changed.
//!
//! ## Entry point
//!
//! ```
//! use warwatch_core::diff::{diff_records, IdentityMode};
//! use warwatch_core::record::Record;
//!
//! let old = vec![Record::new().with("id32", 10).with("enabled", true)];
//! let new = vec![
//!     Record::new().with("id32", 10).with("enabled", true),
//!     Record::new().with("id32", 11).with("enabled", false),
//! ];
//! let diff = diff_records(&old, &new, &IdentityMode::keyed("id32"));
//! assert_eq!(diff.additions.len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no I/O and no error path; inputs are never modified.
//! - **Stable order**: each group follows source order.
//! - **Canonical equality**: values are compared by canonical JSON form, so
//!   nested object key order never registers as a change.
//! - **Positional pairing**: without a key, records pair by index. A middle
//!   insertion shows up as a cascade of changes plus a tail addition.

pub mod engine;
pub mod model;

pub use engine::{changed_fields, diff_records};
pub use model::{FieldChange, Identity, IdentityMode, RecordChange, RecordDiff};
