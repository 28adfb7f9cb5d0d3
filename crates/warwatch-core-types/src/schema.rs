//! Field keys and event names shared by every log line warwatch emits.
//!
//! The `log_op_*` macros write `component`, `op` and `event`. Tick and feed
//! events add the tracker and error keys below, which is what log
//! assertions and JSON log consumers filter on.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

pub const FIELD_TRACKER_ID: &str = "tracker_id";
pub const FIELD_ERR_CODE: &str = "err_code";

/// `event` value written by `log_op_start!`
pub const EVENT_START: &str = "start";
/// `event` value written by `log_op_end!`
pub const EVENT_END: &str = "end";
/// `event` value written by `log_op_error!`
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_key_is_a_flat_identifier() {
        // JSON log consumers index on this key; dotted names would nest
        assert!(!FIELD_ERR_CODE.contains('.'));
    }
}
