#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};
use warwatch_core::errors::{ExError, ExErrorKind};
use warwatch_core::{FeedEndpoints, FeedSource, Notification, NotificationSink, Record, TrackerConfig};

/// Tracker config pointing at a fake API
pub fn test_config(tracker_id: &str) -> TrackerConfig {
    TrackerConfig::new(tracker_id, "https://api.example.test/", "live", "801")
}

/// In-memory feed source keyed by URL
///
/// Unrouted URLs fail with `ExErrorKind::Fetch`.
#[derive(Default)]
pub struct FakeSource {
    routes: Mutex<HashMap<String, Result<Value, ExError>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, url: &str, body: Value) {
        self.routes.lock().unwrap().insert(url.to_string(), Ok(body));
    }

    pub fn fail(&self, url: &str, kind: ExErrorKind) {
        let err = ExError::new(kind).with_message("injected failure");
        self.routes.lock().unwrap().insert(url.to_string(), Err(err));
    }

    /// Route all endpoints of `config` at once
    pub fn serve(
        &self,
        config: &TrackerConfig,
        effects: Vec<Value>,
        story_beat: i64,
        features: Vec<Value>,
        overrides: Vec<Value>,
    ) {
        let endpoints = FeedEndpoints::for_config(config);
        self.set(&endpoints.effects, Value::Array(effects));
        self.set(&endpoints.status, json!({ "storyBeatId32": story_beat, "warId": 801 }));
        self.set(
            &endpoints.game_client,
            json!({
                "featureConfiguration": features,
                "onlineOverrideConfiguration": overrides,
            }),
        );
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl FeedSource for FakeSource {
    fn fetch_json(&self, url: &str) -> Result<Value, ExError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(ExError::new(ExErrorKind::Fetch).with_message("no route")))
    }
}

/// Sink that rejects every notification but counts the attempts
#[derive(Default)]
pub struct RejectingSink {
    attempts: Mutex<usize>,
}

impl RejectingSink {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl NotificationSink for RejectingSink {
    fn publish(&self, _notification: &Notification) -> Result<(), ExError> {
        *self.attempts.lock().unwrap() += 1;
        Err(ExError::new(ExErrorKind::Delivery).with_message("channel unavailable"))
    }
}

pub fn effect_json(id: i64, values: [i64; 2]) -> Value {
    json!({ "id": id, "effectType": 20, "valueTypes": [0, 2], "values": values })
}

pub fn feature_json(id32: i64, enabled: bool) -> Value {
    json!({ "id32": id32, "enabled": enabled, "data": "", "probability": 1.0, "peerSync": false })
}

pub fn override_json(id32: i64, data: &str) -> Value {
    json!({ "id32": id32, "enabled": true, "data": data, "mixId": 1, "dataType": 0 })
}

pub fn record(value: Value) -> Record {
    Record::from_json(value).unwrap()
}
