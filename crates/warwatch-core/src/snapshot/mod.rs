//! Last-known feed state of one tracker.
//!
//! ## Responsibilities
//!
//! - Hold the stored collections and the story-beat scalar between ticks
//! - Define the persisted tracker state shape
//!
//! ## Non-Responsibilities
//!
//! - Persistence (handled by `warwatch-store`)
//! - First-observation policy (handled by the poll cycle)
//! - Scheduling (handled by `warwatch-engine`)

pub mod store;

pub use store::{Snapshot, SnapshotStore, TrackerState};
