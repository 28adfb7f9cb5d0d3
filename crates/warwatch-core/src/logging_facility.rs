//! Structured logging for trackers and the runner.
//!
//! Binaries call [`init`] once with a [`Profile`]; library code only emits
//! events. Every operation worth timing is bracketed by `log_op_start!` and
//! `log_op_end!` (or `log_op_error!`), each carrying `component`, `op` and
//! `event` plus whatever identifiers the call site adds, usually
//! `tracker_id` and `tick_id`.
//!
//! ```rust
//! use warwatch_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```
//!
//! Tests use [`init_test_capture`] instead and assert on the captured events.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
