//! Tracker configuration.
//!
//! A tracker watches one game API instance (one base URL, one war id) and
//! owns its own snapshot. Identity modes are fixed per feed.

use serde::{Deserialize, Serialize};

use crate::diff::IdentityMode;
use crate::errors::{ExError, WatchError};
use crate::feeds::FeedKind;

/// Default poll interval in milliseconds.
pub const DEFAULT_REFRESH_MS: u64 = 60_000;

fn default_refresh_ms() -> u64 {
    DEFAULT_REFRESH_MS
}

/// Identity mode for each collection feed.
///
/// Defaults: effects rely on stable server ordering (positional), feature
/// configs are keyed by `id32`, online overrides are positional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedIdentities {
    #[serde(default = "FeedIdentities::default_effects")]
    pub effects: IdentityMode,
    #[serde(default = "FeedIdentities::default_feature_configs")]
    pub feature_configs: IdentityMode,
    #[serde(default = "FeedIdentities::default_online_overrides")]
    pub online_overrides: IdentityMode,
}

impl FeedIdentities {
    fn default_effects() -> IdentityMode {
        IdentityMode::Positional
    }

    fn default_feature_configs() -> IdentityMode {
        IdentityMode::keyed("id32")
    }

    fn default_online_overrides() -> IdentityMode {
        IdentityMode::Positional
    }

    /// Identity mode for a collection feed. The story beat has none.
    pub fn for_feed(&self, feed: FeedKind) -> Option<&IdentityMode> {
        match feed {
            FeedKind::Effects => Some(&self.effects),
            FeedKind::FeatureConfigs => Some(&self.feature_configs),
            FeedKind::OnlineOverrides => Some(&self.online_overrides),
            FeedKind::StoryBeat => None,
        }
    }
}

impl Default for FeedIdentities {
    fn default() -> Self {
        Self {
            effects: Self::default_effects(),
            feature_configs: Self::default_feature_configs(),
            online_overrides: Self::default_online_overrides(),
        }
    }
}

/// Configuration of one tracked API instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub tracker_id: String,
    /// Base address; a trailing `/` is ignored
    pub base_url: String,
    /// Source identifier shown in notifications (e.g. `live`, `legend`)
    pub api_type: String,
    pub war_id: String,
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
    #[serde(default)]
    pub identity: FeedIdentities,
}

impl TrackerConfig {
    pub fn new(
        tracker_id: impl Into<String>,
        base_url: impl Into<String>,
        api_type: impl Into<String>,
        war_id: impl Into<String>,
    ) -> Self {
        Self {
            tracker_id: tracker_id.into(),
            base_url: base_url.into(),
            api_type: api_type.into(),
            war_id: war_id.into(),
            refresh_ms: DEFAULT_REFRESH_MS,
            identity: FeedIdentities::default(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.strip_suffix('/').unwrap_or(&self.base_url)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<(), ExError> {
        let invalid = |reason: &str| -> ExError {
            ExError::from(WatchError::InvalidConfig {
                tracker_id: self.tracker_id.clone(),
                reason: reason.to_string(),
            })
            .with_op("validate_tracker_config")
        };

        if self.tracker_id.trim().is_empty() {
            return Err(invalid("tracker_id must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(invalid("base_url must not be empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(invalid("base_url must start with http:// or https://"));
        }
        if self.war_id.trim().is_empty() {
            return Err(invalid("war_id must not be empty"));
        }
        if self.refresh_ms == 0 {
            return Err(invalid("refresh_ms must be greater than zero"));
        }
        for feed in FeedKind::COLLECTIONS {
            if let Some(IdentityMode::Keyed { key }) = self.identity.for_feed(feed) {
                if key.trim().is_empty() {
                    return Err(invalid(&format!("{} key must not be empty", feed)));
                }
            }
        }
        Ok(())
    }
}
