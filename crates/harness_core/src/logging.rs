//! Logging initialization for test binaries.

use tracing_subscriber::EnvFilter;

/// Initialize logging for integration tests.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call from every test;
/// only the first call in a process installs the subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_test_writer()
        .try_init();
}
