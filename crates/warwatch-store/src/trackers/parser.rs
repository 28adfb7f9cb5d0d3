//! Tracker file parser with validation
//!
//! Parses YAML and validates schema version, tracker id uniqueness, and each
//! tracker's configuration

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, tracker_file_invalid, Result};
use crate::trackers::format_v0::TrackerFileV0;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a tracker file from a path
pub fn parse_tracker_file(path: &Path) -> Result<TrackerFileV0> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_tracker_file", e))?;
    parse_tracker_str(&content)
}

/// Parse a tracker file from a string
pub fn parse_tracker_str(content: &str) -> Result<TrackerFileV0> {
    let file: TrackerFileV0 = serde_yaml::from_str(content)
        .map_err(|e| tracker_file_invalid(&format!("YAML parse error: {}", e)))?;

    validate_tracker_file(&file)?;

    Ok(file)
}

fn validate_tracker_file(file: &TrackerFileV0) -> Result<()> {
    if file.schema_version != 0 {
        return Err(tracker_file_invalid(&format!(
            "Unsupported schema_version: {}. Expected 0",
            file.schema_version
        )));
    }

    if file.trackers.is_empty() {
        return Err(tracker_file_invalid("Tracker file lists no trackers"));
    }

    let mut ids = HashSet::new();
    for tracker in &file.trackers {
        tracker.validate()?;
        if !ids.insert(tracker.tracker_id.as_str()) {
            return Err(tracker_file_invalid(&format!(
                "Duplicate tracker_id {}",
                tracker.tracker_id
            ))
            .with_tracker_id(tracker.tracker_id.as_str()));
        }
    }

    Ok(())
}
