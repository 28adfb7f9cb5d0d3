//! Repository layer for persisting tracker state to SQLite

pub mod state_repo;

pub use state_repo::{SqliteStateRepo, StoredTracker};
