//! In-memory log capture for assertions in tests
//!
//! [`init_test_capture`] installs a process-wide registry with a
//! [`TestCaptureLayer`] the first time it is called and hands every caller the
//! same [`TestCapture`]. Tests running in parallel share it, so assertions
//! should filter on an op name or tracker id unique to the test.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use warwatch_core_types::schema::{
    FIELD_COMPONENT, FIELD_ERR_CODE, FIELD_EVENT, FIELD_OP, FIELD_TRACKER_ID,
};

/// One captured event, with every field rendered to a string.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn tracker_id(&self) -> Option<&str> {
        self.field(FIELD_TRACKER_ID)
    }

    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }

    fn is(&self, op: &str) -> bool {
        self.op.as_deref() == Some(op)
    }
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl FieldVisitor {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

type EventBuffer = Arc<Mutex<Vec<CapturedEvent>>>;

/// Layer that appends every event it sees to a shared buffer
pub struct TestCaptureLayer {
    events: EventBuffer,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = EventBuffer::default();
        (
            Self {
                events: Arc::clone(&events),
            },
            TestCapture { events },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let fields = visitor.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Read handle over captured events
#[derive(Clone)]
pub struct TestCapture {
    events: EventBuffer,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Assert that an event with this op and event name was captured
    ///
    /// # Panics
    ///
    /// Panics if no such event exists
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.is(op) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    /// Events of one op that carry the given tracker id
    pub fn events_for_tracker(&self, op: &str, tracker_id: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.is(op) && e.tracker_id() == Some(tracker_id))
            .collect()
    }

    /// Warn-level events of one op that carry the given tracker id
    pub fn warnings_for_tracker(&self, op: &str, tracker_id: &str) -> Vec<CapturedEvent> {
        self.events_for_tracker(op, tracker_id)
            .into_iter()
            .filter(|e| e.level == Level::WARN)
            .collect()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber once and return the shared handle
///
/// ```
/// use warwatch_core::logging_facility::test_capture::init_test_capture;
/// use warwatch_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture", tracker_id = "doc");
/// assert_eq!(capture.events_for_tracker("doc_capture", "doc").len(), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_for_tracker_filters_on_field() {
        let capture = init_test_capture();
        tracing::info!(op = "capture_filter_check", tracker_id = "alpha");
        tracing::info!(op = "capture_filter_check", tracker_id = "beta");

        let alpha = capture.events_for_tracker("capture_filter_check", "alpha");
        assert_eq!(alpha.len(), 1);
        assert_eq!(alpha[0].tracker_id(), Some("alpha"));
    }

    #[test]
    fn test_warnings_for_tracker_skips_other_levels() {
        let capture = init_test_capture();
        tracing::info!(op = "capture_level_check", tracker_id = "gamma");
        tracing::warn!(
            op = "capture_level_check",
            tracker_id = "gamma",
            err_code = "ERR_FETCH"
        );

        let warnings = capture.warnings_for_tracker("capture_level_check", "gamma");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].err_code(), Some("ERR_FETCH"));
    }
}
