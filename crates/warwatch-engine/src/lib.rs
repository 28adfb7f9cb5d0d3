//! Warwatch Engine - Host adapters and orchestration
//!
//! Connects the core poll cycle to the outside world:
//! - `HttpFeedSource`: blocking HTTP fetches of feed endpoints
//! - `LogSink`: publishes notifications through `tracing`
//! - `TrackerRunner`: hydrates trackers from SQLite, ticks them on their
//!   interval and persists state after every tick

pub mod http_source;
pub mod log_sink;
pub mod runner;

pub use http_source::{HttpFeedSource, HttpSourceConfig};
pub use log_sink::LogSink;
pub use runner::{RunSummary, TrackerRunner};
