//! SQLite repository for tracker state
//!
//! One row per tracker: its configuration and last snapshot as JSON, plus a
//! tick counter. Saves are upserts.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, serialization_error, Result};
use rusqlite::{Connection, OptionalExtension};
use warwatch_core::errors::WatchError;
use warwatch_core::TrackerState;

/// A loaded row: the state plus its last write time (unix seconds)
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTracker {
    pub state: TrackerState,
    pub updated_at: i64,
}

/// SQLite repository for [`TrackerState`]
pub struct SqliteStateRepo;

impl SqliteStateRepo {
    /// Insert or replace the state of one tracker
    pub fn save(conn: &Connection, state: &TrackerState) -> Result<()> {
        let tracker_id = state.config.tracker_id.as_str();
        let config_json = serde_json::to_string(&state.config)
            .map_err(|e| serialization_error(tracker_id, "config_json", e))?;
        let snapshot_json = serde_json::to_string(&state.snapshot)
            .map_err(|e| serialization_error(tracker_id, "snapshot_json", e))?;
        let tick_count = i64::try_from(state.tick_count).unwrap_or(i64::MAX);

        conn.execute(
            "INSERT INTO tracker_state (tracker_id, config_json, snapshot_json, tick_count, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(tracker_id) DO UPDATE SET
                config_json = excluded.config_json,
                snapshot_json = excluded.snapshot_json,
                tick_count = excluded.tick_count,
                updated_at = excluded.updated_at",
            rusqlite::params![
                tracker_id,
                config_json,
                snapshot_json,
                tick_count,
                chrono::Utc::now().timestamp(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Load one tracker, or `None` if nothing is stored for it
    pub fn load(conn: &Connection, tracker_id: &str) -> Result<Option<StoredTracker>> {
        let row: Option<(String, String, i64, i64)> = conn
            .query_row(
                "SELECT config_json, snapshot_json, tick_count, updated_at
                 FROM tracker_state WHERE tracker_id = ?1",
                [tracker_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()
            .map_err(from_rusqlite)?;

        let Some((config_json, snapshot_json, tick_count, updated_at)) = row else {
            return Ok(None);
        };

        let config = serde_json::from_str(&config_json)
            .map_err(|e| serialization_error(tracker_id, "config_json", e))?;
        let snapshot = serde_json::from_str(&snapshot_json)
            .map_err(|e| serialization_error(tracker_id, "snapshot_json", e))?;

        Ok(Some(StoredTracker {
            state: TrackerState {
                config,
                snapshot,
                tick_count: u64::try_from(tick_count).unwrap_or(0),
            },
            updated_at,
        }))
    }

    /// Load one tracker, failing with `ERR_NOT_FOUND` if it is absent
    pub fn require(conn: &Connection, tracker_id: &str) -> Result<StoredTracker> {
        Self::load(conn, tracker_id)?.ok_or_else(|| {
            WatchError::TrackerNotFound {
                tracker_id: tracker_id.to_string(),
            }
            .into()
        })
    }

    /// All stored tracker ids, sorted
    pub fn list_ids(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn
            .prepare("SELECT tracker_id FROM tracker_state ORDER BY tracker_id")
            .map_err(from_rusqlite)?;
        let ids = stmt
            .query_map([], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(ids)
    }

    /// Delete one tracker's state; returns whether a row existed
    pub fn delete(conn: &Connection, tracker_id: &str) -> Result<bool> {
        let deleted = conn
            .execute("DELETE FROM tracker_state WHERE tracker_id = ?1", [tracker_id])
            .map_err(from_rusqlite)?;
        Ok(deleted > 0)
    }
}
