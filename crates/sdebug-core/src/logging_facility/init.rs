//! Subscriber setup for the `sdebug` binary.
//!
//! Logs always go to stderr; stdout belongs to the rendered diffs.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output format for boundary logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug level for sdebug crates
    Pretty,
    /// One JSON object per line, info level
    Json,
    /// Leave the global subscriber to `init_test_capture`
    Test,
}

impl Profile {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Profile::Json
        } else {
            Profile::Pretty
        }
    }

    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(self) -> &'static str {
        match self {
            Profile::Pretty => "sdebug=debug",
            Profile::Json => "sdebug=info",
            Profile::Test => "off",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber; later calls are no-ops
///
/// ```
/// use sdebug_core::logging_facility::{init, Profile};
///
/// init(Profile::from_json_flag(false));
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(profile.filter());
        // try_init: a test binary may already own the global default
        match profile {
            Profile::Pretty => {
                let _ = builder.try_init();
            }
            Profile::Json => {
                let _ = builder.json().try_init();
            }
            Profile::Test => {
                let _ = tracing_subscriber::registry().try_init();
            }
        }
    });
}
