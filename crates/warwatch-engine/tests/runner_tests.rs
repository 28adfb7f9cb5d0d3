#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{db_path, fast_config, FakeSource};
use serde_json::json;
use warwatch_core::{CollectingSink, FeedKind, NotificationKind};
use warwatch_engine::TrackerRunner;
use warwatch_store::db::open_and_migrate;
use warwatch_store::SqliteStateRepo;

#[test]
fn test_tick_all_persists_seeded_state() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_and_migrate(db_path(&dir)).unwrap();
    let config = fast_config("alpha");
    let source = FakeSource::default();
    source.serve(&config, json!([{"id": 1, "values": [0, 5]}]), 42, json!([]));
    let sink = CollectingSink::new();

    let mut runner = TrackerRunner::hydrate(&conn, vec![config], &source, &sink).unwrap();
    let (reports, summary) = runner.tick_all();

    assert_eq!(reports.len(), 1);
    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.persist_failures, 0);
    assert!(sink.is_empty());

    let stored = SqliteStateRepo::require(&conn, "alpha").unwrap();
    assert_eq!(stored.state.tick_count, 1);
    assert_eq!(stored.state.snapshot.effects.len(), 1);
    assert_eq!(stored.state.snapshot.story_beat_id32, Some(42));
}

#[test]
fn test_restored_snapshot_is_not_a_first_observation() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config("beta");
    let source = FakeSource::default();
    let sink = CollectingSink::new();

    {
        let conn = open_and_migrate(db_path(&dir)).unwrap();
        source.serve(&config, json!([{"id": 1, "values": [0, 5]}]), 42, json!([]));
        let mut runner =
            TrackerRunner::hydrate(&conn, vec![config.clone()], &source, &sink).unwrap();
        runner.tick_all();
    }

    // A new process opens the same database
    let conn = open_and_migrate(db_path(&dir)).unwrap();
    source.serve(&config, json!([{"id": 1, "values": [0, 7]}]), 43, json!([]));
    let mut runner = TrackerRunner::hydrate(&conn, vec![config], &source, &sink).unwrap();
    assert_eq!(runner.trackers().next().unwrap().tick_count(), 1);
    runner.tick_all();

    let published = sink.published();
    assert_eq!(published.len(), 2);
    assert_eq!(published[0].feed, FeedKind::Effects);
    assert_eq!(published[0].kind, NotificationKind::Changed);
    assert_eq!(published[1].feed, FeedKind::StoryBeat);
    assert_eq!(
        SqliteStateRepo::require(&conn, "beta").unwrap().state.tick_count,
        2
    );
}

#[test]
fn test_file_config_wins_over_stored_config() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_and_migrate(db_path(&dir)).unwrap();
    let config = fast_config("gamma");
    let source = FakeSource::default();
    let sink = CollectingSink::new();
    source.serve(&config, json!([]), 1, json!([]));
    TrackerRunner::hydrate(&conn, vec![config.clone()], &source, &sink)
        .unwrap()
        .tick_all();

    let mut renamed = config.clone();
    renamed.api_type = "legend".to_string();
    source.serve(&config, json!([]), 2, json!([]));
    TrackerRunner::hydrate(&conn, vec![renamed], &source, &sink)
        .unwrap()
        .tick_all();

    let published = sink.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].api_type, "legend");
    let stored = SqliteStateRepo::require(&conn, "gamma").unwrap();
    assert_eq!(stored.state.config.api_type, "legend");
}

#[test]
fn test_run_stops_after_max_ticks_per_tracker() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_and_migrate(db_path(&dir)).unwrap();
    let first = fast_config("delta");
    let second = fast_config("epsilon");
    let source = FakeSource::default();
    source.serve(&first, json!([]), 1, json!([{"id32": 1, "enabled": true}]));
    source.serve(&second, json!([]), 1, json!([]));
    let sink = CollectingSink::new();

    let mut runner =
        TrackerRunner::hydrate(&conn, vec![first, second], &source, &sink).unwrap();
    let summary = runner.run(Some(3));

    assert_eq!(summary.ticks, 6);
    assert_eq!(summary.fetch_failures, 0);
    assert!(sink.is_empty());
    for id in ["delta", "epsilon"] {
        assert_eq!(SqliteStateRepo::require(&conn, id).unwrap().state.tick_count, 3);
    }
}

#[test]
fn test_fetch_failures_are_counted_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_and_migrate(db_path(&dir)).unwrap();
    let source = FakeSource::default();
    let sink = CollectingSink::new();

    let mut runner =
        TrackerRunner::hydrate(&conn, vec![fast_config("zeta")], &source, &sink).unwrap();
    let summary = runner.run(Some(1));

    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.fetch_failures, 4);
    let stored = SqliteStateRepo::require(&conn, "zeta").unwrap();
    assert_eq!(stored.state.snapshot.story_beat_id32, None);
}

#[test]
fn test_invalid_config_fails_hydration() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_and_migrate(db_path(&dir)).unwrap();
    let mut config = fast_config("eta");
    config.refresh_ms = 0;
    let source = FakeSource::default();
    let sink = CollectingSink::new();

    let err = TrackerRunner::hydrate(&conn, vec![config], &source, &sink)
        .err()
        .unwrap();
    assert_eq!(err.kind(), warwatch_core::ExErrorKind::InvalidConfig);
}
