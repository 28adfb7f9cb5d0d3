//! Typed views over the concrete feed payloads.
//!
//! The diff engine never depends on these: it works on [`Record`]s. The views
//! exist for decoding endpoint envelopes and for rendering. Each view keeps
//! the fields it does not know about in `extra`, so nothing is lost when a
//! record round-trips through its typed form.

use serde::{Deserialize, Serialize};

use crate::errors::WatchError;
use crate::record::Record;

/// One galactic war effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarEffect {
    pub id: i64,
    #[serde(default)]
    pub gameplay_effect_id32: i64,
    pub effect_type: i64,
    #[serde(default)]
    pub flags: i64,
    #[serde(default)]
    pub name_hash: i64,
    #[serde(default)]
    pub description_fluff_hash: i64,
    #[serde(default)]
    pub description_game_play_long_hash: i64,
    #[serde(default)]
    pub description_game_play_short_hash: i64,
    #[serde(default)]
    pub value_types: Vec<i64>,
    #[serde(default)]
    pub values: Vec<i64>,
    #[serde(flatten)]
    pub extra: Record,
}

impl WarEffect {
    /// Decode a war effect from a feed record.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::FeedDecode` if required fields are missing or mistyped.
    pub fn from_record(record: &Record) -> Result<Self, WatchError> {
        decode_record(record, "effects")
    }

    /// The `(value type, value)` pair in slot `index`, if present.
    pub fn value_slot(&self, index: usize) -> Option<(i64, i64)> {
        let value_type = self.value_types.get(index).copied()?;
        let value = self.values.get(index).copied()?;
        Some((value_type, value))
    }
}

/// One game client feature configuration entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureConfig {
    pub id32: i64,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub peer_sync: bool,
    #[serde(flatten)]
    pub extra: Record,
}

impl FeatureConfig {
    /// # Errors
    ///
    /// Returns `WatchError::FeedDecode` if required fields are missing or mistyped.
    pub fn from_record(record: &Record) -> Result<Self, WatchError> {
        decode_record(record, "feature_configs")
    }
}

/// Type tag carried by an online override's `data` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum OverrideDataType {
    String,
    Number,
    Boolean,
    Other(i64),
}

impl From<i64> for OverrideDataType {
    fn from(value: i64) -> Self {
        match value {
            0 => OverrideDataType::String,
            5 => OverrideDataType::Number,
            7 => OverrideDataType::Boolean,
            other => OverrideDataType::Other(other),
        }
    }
}

impl From<OverrideDataType> for i64 {
    fn from(value: OverrideDataType) -> Self {
        match value {
            OverrideDataType::String => 0,
            OverrideDataType::Number => 5,
            OverrideDataType::Boolean => 7,
            OverrideDataType::Other(other) => other,
        }
    }
}

/// An online override: a feature configuration plus mix and type fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOverride {
    #[serde(flatten)]
    pub feature: FeatureConfig,
    #[serde(default)]
    pub mix_id: i64,
    #[serde(default)]
    pub parent_mix_id: Option<i64>,
    pub data_type: OverrideDataType,
}

impl OnlineOverride {
    /// # Errors
    ///
    /// Returns `WatchError::FeedDecode` if required fields are missing or mistyped.
    pub fn from_record(record: &Record) -> Result<Self, WatchError> {
        decode_record(record, "online_overrides")
    }
}

/// Payload of the war status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarStatus {
    pub story_beat_id32: i64,
    #[serde(flatten)]
    pub extra: Record,
}

/// Payload of the game client configuration endpoint.
///
/// One fetch of this envelope feeds two trackers: feature configs and
/// online overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameClientConfig {
    #[serde(default)]
    pub feature_configuration: Vec<Record>,
    #[serde(default)]
    pub online_override_configuration: Vec<Record>,
}

fn decode_record<T: serde::de::DeserializeOwned>(
    record: &Record,
    feed: &str,
) -> Result<T, WatchError> {
    serde_json::from_value(record.to_json()).map_err(|e| WatchError::FeedDecode {
        feed: feed.to_string(),
        reason: e.to_string(),
    })
}
