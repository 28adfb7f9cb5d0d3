//! Correlation types for tick tracking
//!
//! A `TickId` ties together every log event, notification and report
//! produced by one poll cycle of one tracker.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single tick of a tracker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickId(String);

impl TickId {
    /// Generate a new time-ordered TickId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for TickId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TickId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_id_generation() {
        let id1 = TickId::new();
        let id2 = TickId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_tick_ids_are_time_ordered() {
        let earlier = TickId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = TickId::new();

        // UUIDv7 strings sort by creation time at millisecond resolution
        assert!(earlier.as_str() < later.as_str());
    }

    #[test]
    fn test_tick_id_display() {
        let id = TickId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_serialization() {
        let id = TickId::from_string("tick-1".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"tick-1\"");
        let deserialized: TickId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
