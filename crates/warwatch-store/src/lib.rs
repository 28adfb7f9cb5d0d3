//! Warwatch Store - Persistence layer with SQLite and tracker files
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - Tracker state repository (config, snapshot, tick count)
//! - Tracker file v0 parser

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod trackers;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteStateRepo, StoredTracker};
