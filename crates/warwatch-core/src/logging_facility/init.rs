//! Subscriber installation.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 4] = ["warwatch_core", "warwatch_store", "warwatch_engine", "warwatch_cli"];

/// Output profile chosen by the binary at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines at debug level
    Development,
    /// One JSON object per event at info level
    Production,
    /// Installs nothing; tests install a capture layer themselves
    Test,
}

impl Profile {
    fn level(&self) -> &'static str {
        match self {
            Profile::Development => "debug",
            Profile::Production | Profile::Test => "info",
        }
    }

    /// Filter used when `RUST_LOG` is unset, e.g. `warwatch_core=info,...`
    pub fn default_directive(&self) -> String {
        CRATES
            .iter()
            .map(|krate| format!("{}={}", krate, self.level()))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`.
///
/// Only the first call has any effect. `RUST_LOG` overrides the profile's
/// default filter.
///
/// ```
/// use warwatch_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(profile.filter())
                .try_init();
        }
        Profile::Production => {
            let _ = tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.filter())
                .try_init();
        }
        Profile::Test => {}
    });
}
