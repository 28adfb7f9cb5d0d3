//! Notification sink interface.

use std::sync::Mutex;

use crate::errors::{ExError, ExErrorKind, Result};
use crate::notify::Notification;

/// Delivers notifications to an external channel.
#[allow(clippy::result_large_err)]
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Delivery` if the channel rejected it.
    fn publish(&self, notification: &Notification) -> Result<()>;
}

/// Keeps every published notification in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    published: Mutex<Vec<Notification>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far.
    pub fn published(&self) -> Vec<Notification> {
        self.published
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Remove and return everything published so far.
    pub fn drain(&self) -> Vec<Notification> {
        self.published
            .lock()
            .map(|mut p| std::mem::take(&mut *p))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.published.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for CollectingSink {
    fn publish(&self, notification: &Notification) -> Result<()> {
        let mut published = self.published.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("publish")
                .with_message("collecting sink lock poisoned")
        })?;
        published.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::story_beat_notification;

    #[test]
    fn test_collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        for after in [2, 3] {
            let n = story_beat_notification("live", 1, after).unwrap();
            sink.publish(&n).unwrap();
        }
        assert_eq!(sink.len(), 2);
        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(sink.is_empty());
    }
}
