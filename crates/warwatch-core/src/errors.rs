use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidConfig,
    NotFound,

    // Feed source
    /// Network or transport failure while fetching a feed
    Fetch,
    /// The source answered with a non-success HTTP status
    HttpStatus,
    /// The payload could not be decoded into the expected feed shape
    Decode,

    // Notification sink
    Delivery,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Fetch => "ERR_FETCH",
            ExErrorKind::HttpStatus => "ERR_HTTP_STATUS",
            ExErrorKind::Decode => "ERR_DECODE",
            ExErrorKind::Delivery => "ERR_DELIVERY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, tracker, feed, url) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    tracker_id: Option<String>,
    feed: Option<String>,
    url: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            tracker_id: None,
            feed: None,
            url: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add tracker ID context
    pub fn with_tracker_id(mut self, id: impl Into<String>) -> Self {
        self.tracker_id = Some(id.into());
        self
    }

    /// Add feed name context
    pub fn with_feed(mut self, feed: impl Into<String>) -> Self {
        self.feed = Some(feed.into());
        self
    }

    /// Add URL context
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the tracker ID context, if any
    pub fn tracker_id(&self) -> Option<&str> {
        self.tracker_id.as_deref()
    }

    /// Get the feed name context, if any
    pub fn feed(&self) -> Option<&str> {
        self.feed.as_deref()
    }

    /// Get the URL context, if any
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(tracker_id) = &self.tracker_id {
            write!(f, " (tracker_id: {})", tracker_id)?;
        }
        if let Some(feed) = &self.feed {
            write!(f, " (feed: {})", feed)?;
        }
        if let Some(url) = &self.url {
            write!(f, " (url: {})", url)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for tracker operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WatchError {
    /// Tracker configuration failed validation
    #[error("Invalid tracker config {tracker_id}: {reason}")]
    InvalidConfig { tracker_id: String, reason: String },

    /// No persisted state exists for the tracker
    #[error("Tracker not found: {tracker_id}")]
    TrackerNotFound { tracker_id: String },

    /// Feed payload did not match the expected shape
    #[error("Feed {feed} payload could not be decoded: {reason}")]
    FeedDecode { feed: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from WatchError to ExError
impl From<WatchError> for ExError {
    fn from(err: WatchError) -> Self {
        match err {
            WatchError::InvalidConfig { tracker_id, reason } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_tracker_id(tracker_id)
                    .with_message(reason)
            }

            WatchError::TrackerNotFound { tracker_id } => ExError::new(ExErrorKind::NotFound)
                .with_tracker_id(tracker_id)
                .with_message("Tracker not found"),

            WatchError::FeedDecode { feed, reason } => ExError::new(ExErrorKind::Decode)
                .with_feed(feed)
                .with_message(reason),

            WatchError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to WatchError
impl From<serde_json::Error> for WatchError {
    fn from(err: serde_json::Error) -> Self {
        WatchError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::HttpStatus)
            .with_op("fetch_json")
            .with_url("https://example.test/api")
            .with_message("status 503");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_HTTP_STATUS]"));
        assert!(text.contains("fetch_json"));
        assert!(text.contains("status 503"));
        assert!(text.contains("https://example.test/api"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        use std::error::Error as _;
        let inner = ExError::new(ExErrorKind::Io).with_message("socket closed");
        let outer = ExError::new(ExErrorKind::Fetch).with_source(inner);
        let source = outer.source().expect("source should be set");
        assert!(source.to_string().contains("socket closed"));
        assert_eq!(outer.source_error().map(|e| e.kind()), Some(ExErrorKind::Io));
    }
}
