//! Poll cycle controller.
//!
//! One tick fetches every feed of a tracker in order, diffs each against the
//! stored snapshot, publishes the resulting notifications and stores the
//! fetched state. Feeds are independent: a failed fetch only affects its own
//! feed, and delivery failures never roll back a snapshot update.
//!
//! First observation is decided here, not by the store: a feed whose stored
//! collection is empty, or a story beat that was never stored, takes the
//! fetched state silently.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use warwatch_core_types::TickId;

use crate::config::TrackerConfig;
use crate::diff::{diff_records, IdentityMode};
use crate::errors::{ExError, WatchError};
use crate::feeds::FeedKind;
use crate::notify::{notifications_for_diff, story_beat_notification, Notification};
use crate::record::Record;
use crate::shapes::{GameClientConfig, WarStatus};
use crate::sink::NotificationSink;
use crate::snapshot::{Snapshot, SnapshotStore, TrackerState};
use crate::source::{FeedEndpoints, FeedSource};
use crate::{log_op_end, log_op_start};

/// What happened to one feed during a tick.
#[derive(Debug, Clone)]
pub enum FeedOutcome {
    /// First observation: state stored, nothing published.
    /// `records` is 1 for the story beat.
    Seeded { records: usize },
    /// Stored state was diffed against the fetched state.
    Compared {
        added: usize,
        removed: usize,
        changed: usize,
    },
    /// The fetch failed; the stored state is untouched.
    FetchFailed(ExError),
}

#[derive(Debug, Clone)]
pub struct FeedReport {
    pub feed: FeedKind,
    pub outcome: FeedOutcome,
    /// Notifications the sink accepted
    pub published: usize,
    /// Notifications the sink rejected
    pub delivery_failures: usize,
}

impl FeedReport {
    fn new(feed: FeedKind, outcome: FeedOutcome) -> Self {
        Self {
            feed,
            outcome,
            published: 0,
            delivery_failures: 0,
        }
    }

    pub fn fetch_error(&self) -> Option<&ExError> {
        match &self.outcome {
            FeedOutcome::FetchFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of one tick over all feeds of a tracker.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick_id: TickId,
    pub tracker_id: String,
    /// One entry per feed, in processing order
    pub feeds: Vec<FeedReport>,
    pub duration_ms: u64,
}

impl TickReport {
    pub fn feed(&self, feed: FeedKind) -> Option<&FeedReport> {
        self.feeds.iter().find(|r| r.feed == feed)
    }

    /// Feeds whose fetch failed this tick.
    pub fn failed_feeds(&self) -> Vec<FeedKind> {
        self.feeds
            .iter()
            .filter(|r| r.fetch_error().is_some())
            .map(|r| r.feed)
            .collect()
    }

    pub fn published(&self) -> usize {
        self.feeds.iter().map(|r| r.published).sum()
    }

    pub fn delivery_failures(&self) -> usize {
        self.feeds.iter().map(|r| r.delivery_failures).sum()
    }
}

struct TickContext<'a> {
    config: &'a TrackerConfig,
    sink: &'a dyn NotificationSink,
    tick_id: &'a TickId,
}

impl TickContext<'_> {
    fn fetch_failed(&self, feed: FeedKind, err: ExError) -> FeedReport {
        let err = err
            .with_tracker_id(self.config.tracker_id.as_str())
            .with_feed(feed.as_str());
        warn!(
            component = module_path!(),
            op = "fetch_feed",
            tracker_id = self.config.tracker_id.as_str(),
            tick_id = self.tick_id.as_str(),
            feed = feed.as_str(),
            err_code = err.code(),
            "feed fetch failed: {}",
            err
        );
        FeedReport::new(feed, FeedOutcome::FetchFailed(err))
    }

    /// Publish every notification; a rejected one does not stop the rest.
    fn publish(&self, report: &mut FeedReport, notifications: &[Notification]) {
        for notification in notifications {
            match self.sink.publish(notification) {
                Ok(()) => report.published += 1,
                Err(err) => {
                    report.delivery_failures += 1;
                    warn!(
                        component = module_path!(),
                        op = "publish",
                        tracker_id = self.config.tracker_id.as_str(),
                        tick_id = self.tick_id.as_str(),
                        feed = report.feed.as_str(),
                        kind = notification.kind.as_str(),
                        err_code = err.code(),
                        "notification delivery failed: {}",
                        err
                    );
                }
            }
        }
    }

    fn process_collection(
        &self,
        feed: FeedKind,
        mode: &IdentityMode,
        stored: &mut Vec<Record>,
        fetched: Result<Vec<Record>, ExError>,
    ) -> FeedReport {
        let records = match fetched {
            Ok(records) => records,
            Err(err) => return self.fetch_failed(feed, err),
        };

        // An empty stored collection is treated as never observed
        if stored.is_empty() {
            debug!(
                tracker_id = self.config.tracker_id.as_str(),
                feed = feed.as_str(),
                records = records.len(),
                "first observation stored"
            );
            let report = FeedReport::new(
                feed,
                FeedOutcome::Seeded {
                    records: records.len(),
                },
            );
            *stored = records;
            return report;
        }

        let diff = diff_records(stored, &records, mode);
        let mut report = FeedReport::new(
            feed,
            FeedOutcome::Compared {
                added: diff.additions.len(),
                removed: diff.removals.len(),
                changed: diff.changes.len(),
            },
        );
        debug!(
            tracker_id = self.config.tracker_id.as_str(),
            feed = feed.as_str(),
            added = diff.additions.len(),
            removed = diff.removals.len(),
            changed = diff.changes.len(),
            "feed compared"
        );

        let notifications = notifications_for_diff(feed, &self.config.api_type, &diff);
        self.publish(&mut report, &notifications);
        *stored = records;
        report
    }

    fn process_story_beat(
        &self,
        stored: &mut Option<i64>,
        fetched: Result<WarStatus, ExError>,
    ) -> FeedReport {
        let feed = FeedKind::StoryBeat;
        let current = match fetched {
            Ok(status) => status.story_beat_id32,
            Err(err) => return self.fetch_failed(feed, err),
        };

        let Some(previous) = *stored else {
            *stored = Some(current);
            return FeedReport::new(feed, FeedOutcome::Seeded { records: 1 });
        };

        let notification = story_beat_notification(&self.config.api_type, previous, current);
        let mut report = FeedReport::new(
            feed,
            FeedOutcome::Compared {
                added: 0,
                removed: 0,
                changed: usize::from(notification.is_some()),
            },
        );
        if let Some(notification) = notification {
            self.publish(&mut report, std::slice::from_ref(&notification));
        }
        *stored = Some(current);
        report
    }
}

fn fetch_decoded<T: DeserializeOwned>(
    source: &dyn FeedSource,
    url: &str,
    endpoint: &str,
) -> Result<T, ExError> {
    let value: Value = source.fetch_json(url).map_err(|e| e.with_url(url))?;
    serde_json::from_value(value).map_err(|e| {
        ExError::from(WatchError::FeedDecode {
            feed: endpoint.to_string(),
            reason: e.to_string(),
        })
        .with_op("fetch_feed")
        .with_url(url)
    })
}

/// Run one tick over all feeds of `config`, updating `store` in place.
///
/// Never fails: per-feed problems are reported in the returned [`TickReport`].
pub fn run_tick(
    config: &TrackerConfig,
    store: &mut SnapshotStore,
    source: &dyn FeedSource,
    sink: &dyn NotificationSink,
    tick_id: &TickId,
) -> TickReport {
    log_op_start!(
        "tick",
        tracker_id = config.tracker_id.as_str(),
        tick_id = tick_id.as_str()
    );
    let start = Instant::now();

    let ctx = TickContext {
        config,
        sink,
        tick_id,
    };
    let endpoints = FeedEndpoints::for_config(config);
    let Snapshot {
        effects,
        feature_configs,
        online_overrides,
        story_beat_id32,
    } = store.snapshot_mut();

    let mut feeds = Vec::with_capacity(FeedKind::ALL.len());

    let fetched = fetch_decoded::<Vec<Record>>(source, &endpoints.effects, "effects");
    feeds.push(ctx.process_collection(
        FeedKind::Effects,
        &config.identity.effects,
        effects,
        fetched,
    ));

    let fetched = fetch_decoded::<WarStatus>(source, &endpoints.status, "status");
    feeds.push(ctx.process_story_beat(story_beat_id32, fetched));

    // One game client fetch serves both configuration feeds
    let (features, overrides) =
        match fetch_decoded::<GameClientConfig>(source, &endpoints.game_client, "game_client") {
            Ok(game_client) => (
                Ok(game_client.feature_configuration),
                Ok(game_client.online_override_configuration),
            ),
            Err(err) => (Err(err.clone()), Err(err)),
        };
    feeds.push(ctx.process_collection(
        FeedKind::FeatureConfigs,
        &config.identity.feature_configs,
        feature_configs,
        features,
    ));
    feeds.push(ctx.process_collection(
        FeedKind::OnlineOverrides,
        &config.identity.online_overrides,
        online_overrides,
        overrides,
    ));

    let report = TickReport {
        tick_id: tick_id.clone(),
        tracker_id: config.tracker_id.clone(),
        feeds,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    log_op_end!(
        "tick",
        duration_ms = report.duration_ms,
        tracker_id = config.tracker_id.as_str(),
        tick_id = tick_id.as_str(),
        published = report.published() as u64,
        failed_feeds = report.failed_feeds().len() as u64
    );

    report
}

/// A tracked API instance: its configuration plus the snapshot it owns.
///
/// `tick` takes `&mut self`, so ticks of one tracker never overlap.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackerConfig,
    store: SnapshotStore,
    tick_count: u64,
}

impl Tracker {
    /// Create a tracker with an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::InvalidConfig` if `config` fails validation.
    pub fn new(config: TrackerConfig) -> Result<Self, ExError> {
        Self::restore(TrackerState::new(config))
    }

    /// Rebuild a tracker from persisted state.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::InvalidConfig` if the stored config fails validation.
    pub fn restore(state: TrackerState) -> Result<Self, ExError> {
        state.config.validate()?;
        Ok(Self {
            config: state.config,
            store: SnapshotStore::from_snapshot(state.snapshot),
            tick_count: state.tick_count,
        })
    }

    pub fn to_state(&self) -> TrackerState {
        TrackerState {
            config: self.config.clone(),
            snapshot: self.store.snapshot().clone(),
            tick_count: self.tick_count,
        }
    }

    pub fn tracker_id(&self) -> &str {
        &self.config.tracker_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Run one poll-diff-notify-update cycle.
    pub fn tick(&mut self, source: &dyn FeedSource, sink: &dyn NotificationSink) -> TickReport {
        let tick_id = TickId::new();
        let report = run_tick(&self.config, &mut self.store, source, sink, &tick_id);
        self.tick_count += 1;
        report
    }
}
