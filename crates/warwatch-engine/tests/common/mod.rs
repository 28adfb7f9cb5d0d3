#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};
use warwatch_core::errors::{ExError, ExErrorKind};
use warwatch_core::{FeedEndpoints, FeedSource, TrackerConfig};

/// Tracker config with a 1ms refresh so loops run fast
pub fn fast_config(tracker_id: &str) -> TrackerConfig {
    let mut config = TrackerConfig::new(
        tracker_id,
        format!("https://{}.example.test", tracker_id),
        "live",
        "801",
    );
    config.refresh_ms = 1;
    config
}

/// In-memory feed source keyed by URL
#[derive(Default)]
pub struct FakeSource {
    routes: Mutex<HashMap<String, Value>>,
}

impl FakeSource {
    pub fn serve(&self, config: &TrackerConfig, effects: Value, story_beat: i64, features: Value) {
        let endpoints = FeedEndpoints::for_config(config);
        let mut routes = self.routes.lock().unwrap();
        routes.insert(endpoints.effects, effects);
        routes.insert(endpoints.status, json!({ "storyBeatId32": story_beat }));
        routes.insert(
            endpoints.game_client,
            json!({ "featureConfiguration": features, "onlineOverrideConfiguration": [] }),
        );
    }
}

impl FeedSource for FakeSource {
    fn fetch_json(&self, url: &str) -> Result<Value, ExError> {
        self.routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ExError::new(ExErrorKind::Fetch).with_message("no route"))
    }
}

pub fn db_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("warwatch.db")
}
