//! Migration framework
//!
//! Provides:
//! - Migration runner with recorded checksums
//! - Idempotent application
//! - Embedded SQL migrations

mod embedded;
mod runner;

pub use runner::{apply_migrations, applied_migrations};
