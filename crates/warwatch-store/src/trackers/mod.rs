//! Tracker file parsing
//!
//! A tracker file lists the API instances to watch:
//!
//! ```yaml
//! schema_version: 0
//! trackers:
//!   - tracker_id: live
//!     base_url: https://api.example.test
//!     api_type: live
//!     war_id: "801"
//!     refresh_ms: 30000
//!     identity:
//!       feature_configs: { mode: keyed, key: id32 }
//! ```

pub mod format_v0;
pub mod parser;

pub use format_v0::TrackerFileV0;
pub use parser::{parse_tracker_file, parse_tracker_str};
