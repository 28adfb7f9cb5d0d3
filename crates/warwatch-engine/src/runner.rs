//! Tracker scheduling loop.
//!
//! ## Pipeline (per due tracker):
//! 1. Tick the tracker against the shared source and sink
//! 2. Persist its state (config, snapshot, tick count)
//! 3. Reschedule it `refresh_ms` after the tick started

#![allow(clippy::result_large_err)]

use std::time::{Duration, Instant};

use rusqlite::Connection;
use tracing::{debug, info};
use warwatch_core::errors::ExError;
use warwatch_core::{
    log_op_end, log_op_error, log_op_start, FeedSource, NotificationSink, TickReport, Tracker,
    TrackerConfig, TrackerState,
};
use warwatch_store::SqliteStateRepo;

/// Totals over one [`TrackerRunner::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub published: usize,
    pub fetch_failures: usize,
    pub delivery_failures: usize,
    pub persist_failures: usize,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.published += report.published();
        self.fetch_failures += report.failed_feeds().len();
        self.delivery_failures += report.delivery_failures();
    }
}

struct Scheduled {
    tracker: Tracker,
    next_due: Instant,
    ticks_run: u64,
}

/// Drives a set of trackers against one source and one sink.
///
/// Trackers are ticked one at a time, so no two ticks ever overlap.
pub struct TrackerRunner<'a> {
    conn: &'a Connection,
    source: &'a dyn FeedSource,
    sink: &'a dyn NotificationSink,
    trackers: Vec<Scheduled>,
}

impl<'a> TrackerRunner<'a> {
    /// Build trackers for `configs`, restoring stored snapshots.
    ///
    /// The configuration from `configs` always wins over the stored one; only
    /// the snapshot and tick count are restored.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::InvalidConfig` for an invalid config, or
    /// `ExErrorKind::Persistence`/`Serialization` if stored state cannot be read.
    pub fn hydrate(
        conn: &'a Connection,
        configs: Vec<TrackerConfig>,
        source: &'a dyn FeedSource,
        sink: &'a dyn NotificationSink,
    ) -> Result<Self, ExError> {
        let now = Instant::now();
        let mut trackers = Vec::with_capacity(configs.len());

        for config in configs {
            let state = match SqliteStateRepo::load(conn, &config.tracker_id)? {
                Some(stored) => TrackerState {
                    config,
                    snapshot: stored.state.snapshot,
                    tick_count: stored.state.tick_count,
                },
                None => TrackerState::new(config),
            };
            let tracker = Tracker::restore(state)?;
            info!(
                component = module_path!(),
                op = "hydrate",
                tracker_id = tracker.tracker_id(),
                tick_count = tracker.tick_count(),
                "tracker hydrated"
            );
            trackers.push(Scheduled {
                tracker,
                next_due: now,
                ticks_run: 0,
            });
        }

        Ok(Self {
            conn,
            source,
            sink,
            trackers,
        })
    }

    pub fn trackers(&self) -> impl Iterator<Item = &Tracker> {
        self.trackers.iter().map(|s| &s.tracker)
    }

    /// Tick every tracker once, now, persisting each.
    pub fn tick_all(&mut self) -> (Vec<TickReport>, RunSummary) {
        let mut summary = RunSummary::default();
        let reports = (0..self.trackers.len())
            .map(|i| self.tick_one(i, &mut summary))
            .collect();
        (reports, summary)
    }

    /// Run until every tracker has ticked `max_ticks` times.
    ///
    /// With `max_ticks = None` this never returns.
    pub fn run(&mut self, max_ticks: Option<u64>) -> RunSummary {
        log_op_start!(
            "run",
            trackers = self.trackers.len() as u64,
            max_ticks = max_ticks.unwrap_or(0)
        );
        let start = Instant::now();
        let mut summary = RunSummary::default();

        while let Some(i) = self.next_due(max_ticks) {
            let wait = self.trackers[i]
                .next_due
                .saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                debug!(
                    tracker_id = self.trackers[i].tracker.tracker_id(),
                    wait_ms = wait.as_millis() as u64,
                    "sleeping until next tick"
                );
                std::thread::sleep(wait);
            }
            self.tick_one(i, &mut summary);
        }

        log_op_end!(
            "run",
            duration_ms = start.elapsed().as_millis() as u64,
            ticks = summary.ticks,
            published = summary.published as u64,
            persist_failures = summary.persist_failures as u64
        );
        summary
    }

    /// Index of the soonest-due tracker that still has ticks left.
    fn next_due(&self, max_ticks: Option<u64>) -> Option<usize> {
        self.trackers
            .iter()
            .enumerate()
            .filter(|(_, s)| max_ticks.map_or(true, |max| s.ticks_run < max))
            .min_by_key(|(_, s)| s.next_due)
            .map(|(i, _)| i)
    }

    fn tick_one(&mut self, index: usize, summary: &mut RunSummary) -> TickReport {
        let scheduled = &mut self.trackers[index];
        let started = Instant::now();

        let report = scheduled.tracker.tick(self.source, self.sink);
        summary.record(&report);
        scheduled.ticks_run += 1;
        scheduled.next_due =
            started + Duration::from_millis(scheduled.tracker.config().refresh_ms);

        let persist_start = Instant::now();
        if let Err(err) = SqliteStateRepo::save(self.conn, &scheduled.tracker.to_state()) {
            summary.persist_failures += 1;
            log_op_error!(
                "persist_state",
                err.with_tracker_id(scheduled.tracker.tracker_id()),
                duration_ms = persist_start.elapsed().as_millis() as u64,
                tracker_id = scheduled.tracker.tracker_id()
            );
        }

        report
    }
}
