//! Notification sink that writes through `tracing`.

use tracing::info;
use warwatch_core::errors::ExError;
use warwatch_core::{render_summary, Notification, NotificationSink};

/// Publishes each notification as one info event carrying its text summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn publish(&self, notification: &Notification) -> Result<(), ExError> {
        info!(
            component = module_path!(),
            op = "notify",
            feed = notification.feed.as_str(),
            kind = notification.kind.as_str(),
            api_type = notification.api_type.as_str(),
            "{}",
            render_summary(notification)
        );
        Ok(())
    }
}
