//! Harness configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Interval between background-queue polls when no override is set.
pub const DEFAULT_QUEUE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Request timeout for the test HTTP client when no override is set.
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunable knobs for the harness.
///
/// Optional environment variables:
/// - `HARNESS_QUEUE_POLL_MS`: queue poll interval in milliseconds
/// - `HARNESS_CLIENT_TIMEOUT_SECS`: test client request timeout in seconds
///
/// Unset or unparsable values fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Fixed delay between background-queue polls.
    pub queue_poll_interval: Duration,
    /// Request timeout applied to the test HTTP client.
    pub client_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            queue_poll_interval: DEFAULT_QUEUE_POLL_INTERVAL,
            client_timeout: DEFAULT_CLIENT_TIMEOUT,
        }
    }
}

impl HarnessConfig {
    /// Load the configuration from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = parse_var("HARNESS_QUEUE_POLL_MS") {
            config.queue_poll_interval = Duration::from_millis(millis);
        }
        if let Some(secs) = parse_var("HARNESS_CLIENT_TIMEOUT_SECS") {
            config.client_timeout = Duration::from_secs(secs);
        }

        config
    }
}

fn parse_var(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match raw.parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(
                var = name,
                value = %raw,
                "ignoring unparsable harness override; using default"
            );
            None
        }
    }
}
