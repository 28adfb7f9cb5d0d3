//! The four independently tracked feeds of a tracker.

use serde::{Deserialize, Serialize};

/// One independently tracked feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// Galactic war effects (collection)
    Effects,
    /// The story-beat identifier from the war status (scalar)
    StoryBeat,
    /// Game client feature configuration (collection)
    FeatureConfigs,
    /// Game client online override configuration (collection)
    OnlineOverrides,
}

impl FeedKind {
    /// All feeds in per-tick processing order.
    pub const ALL: [FeedKind; 4] = [
        FeedKind::Effects,
        FeedKind::StoryBeat,
        FeedKind::FeatureConfigs,
        FeedKind::OnlineOverrides,
    ];

    /// Feeds whose state is a record collection.
    pub const COLLECTIONS: [FeedKind; 3] = [
        FeedKind::Effects,
        FeedKind::FeatureConfigs,
        FeedKind::OnlineOverrides,
    ];

    /// Stable machine name, used in logs and persisted state.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::Effects => "effects",
            FeedKind::StoryBeat => "story_beat",
            FeedKind::FeatureConfigs => "feature_configs",
            FeedKind::OnlineOverrides => "online_overrides",
        }
    }

    /// Human-facing subject label.
    pub fn label(&self) -> &'static str {
        match self {
            FeedKind::Effects => "Galactic War Effect",
            FeedKind::StoryBeat => "storyBeatId32",
            FeedKind::FeatureConfigs => "GameClient feature",
            FeedKind::OnlineOverrides => "GameClient override",
        }
    }

    /// Heading for the per-field change listing.
    pub fn changes_title(&self) -> &'static str {
        match self {
            FeedKind::Effects => "Effect Changes",
            FeedKind::StoryBeat => "Story Beat Change",
            FeedKind::FeatureConfigs => "Feature Changes",
            FeedKind::OnlineOverrides => "Override Changes",
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collections_exclude_story_beat() {
        assert!(!FeedKind::COLLECTIONS.contains(&FeedKind::StoryBeat));
        assert_eq!(FeedKind::COLLECTIONS.len() + 1, FeedKind::ALL.len());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for feed in FeedKind::ALL {
            let json = serde_json::to_string(&feed).unwrap();
            assert_eq!(json, format!("\"{}\"", feed.as_str()));
        }
    }
}
