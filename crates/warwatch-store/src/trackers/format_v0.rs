//! Tracker file format v0 schema

use serde::{Deserialize, Serialize};
use warwatch_core::TrackerConfig;

/// Top-level tracker file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerFileV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Trackers to run, in file order
    pub trackers: Vec<TrackerConfig>,
}
