//! Feed source interface and endpoint layout.

use serde_json::Value;

use crate::config::TrackerConfig;
use crate::errors::Result;

/// Fetches and parses one JSON document.
///
/// Implementations own transport concerns (timeouts, headers, retries). The
/// poll cycle calls `fetch_json` once per endpoint per tick.
#[allow(clippy::result_large_err)]
pub trait FeedSource: Send + Sync {
    /// Fetch `url` and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Fetch` for transport failures,
    /// `ExErrorKind::HttpStatus` for non-success responses, or
    /// `ExErrorKind::Decode` when the body is not JSON.
    fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// The three endpoints polled for one tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEndpoints {
    pub effects: String,
    pub status: String,
    /// Serves both feature configs and online overrides
    pub game_client: String,
}

impl FeedEndpoints {
    pub fn for_config(config: &TrackerConfig) -> Self {
        let base = config.normalized_base_url();
        Self {
            effects: format!("{}/api/WarSeason/GalacticWarEffects", base),
            status: format!("{}/api/WarSeason/{}/Status", base, config.war_id),
            game_client: format!("{}/api/Configuration/GameClient", base),
        }
    }
}
