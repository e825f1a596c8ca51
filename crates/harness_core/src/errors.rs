//! Error types for the test harness.

use app_host::{HostError, ResolveError};
use thiserror::Error;

/// Failures surfaced to test authors by the harness.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// `client()` was accessed before `initialize()` ran.
    #[error("test session has not been initialized; call initialize() first")]
    NotInitialized,

    /// The session was used after `dispose()`.
    #[error("test session has already been disposed")]
    Disposed,

    /// A service could not be resolved; propagated from the registry
    /// unchanged.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The application host or its HTTP client failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The queue-drain wait was cancelled by the caller's token.
    #[error("queue drain wait was cancelled")]
    WaitCancelled,

    /// The queue prober itself failed.
    #[error("queue probe failed")]
    Probe(#[source] anyhow::Error),
}
