use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::record::Record;

/// All last-known feed states of one tracker.
///
/// `story_beat_id32` is `None` until the status feed has been observed once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub effects: Vec<Record>,
    #[serde(default)]
    pub feature_configs: Vec<Record>,
    #[serde(default)]
    pub online_overrides: Vec<Record>,
    #[serde(default)]
    pub story_beat_id32: Option<i64>,
}

/// Owner of one tracker's [`Snapshot`].
///
/// Every write replaces a feed's state wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotStore {
    snapshot: Snapshot,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Mutable access for the poll cycle, which writes feeds one at a time.
    pub fn snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.snapshot
    }

    pub fn story_beat(&self) -> Option<i64> {
        self.snapshot.story_beat_id32
    }
}

/// Persisted state of one tracker: its configuration and last snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    pub config: TrackerConfig,
    #[serde(default)]
    pub snapshot: Snapshot,
    #[serde(default)]
    pub tick_count: u64,
}

impl TrackerState {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            snapshot: Snapshot::default(),
            tick_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = SnapshotStore::new();
        assert_eq!(store.snapshot(), &Snapshot::default());
        assert_eq!(store.story_beat(), None);
    }

    #[test]
    fn test_writes_through_snapshot_mut_are_kept() {
        let mut store = SnapshotStore::new();
        let snapshot = store.snapshot_mut();
        snapshot.effects = vec![Record::new().with("id", 1)];
        snapshot.story_beat_id32 = Some(0);

        assert_eq!(store.snapshot().effects.len(), 1);
        assert!(store.snapshot().feature_configs.is_empty());
        assert_eq!(store.story_beat(), Some(0));
    }

    #[test]
    fn test_tracker_state_defaults_missing_snapshot() {
        let state: TrackerState = serde_json::from_value(serde_json::json!({
            "config": {
                "tracker_id": "live-1",
                "base_url": "https://api.example.test",
                "api_type": "live",
                "war_id": "801"
            }
        }))
        .unwrap();
        assert_eq!(state.snapshot, Snapshot::default());
        assert_eq!(state.tick_count, 0);
    }
}
