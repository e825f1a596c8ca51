//! Error types for service resolution and application hosting.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Failure to resolve a service from a registry or scope.
///
/// Resolution failures are propagated unchanged to callers so that a test
/// failure names the exact type that was never registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no service registered for type `{type_name}`")]
    NotRegistered {
        /// Fully qualified name of the requested type.
        type_name: &'static str,
    },
}

/// Failure while hosting the application under test or talking to it.
#[derive(Error, Debug)]
pub enum HostError {
    /// The test listener could not be bound to a loopback port.
    #[error("failed to bind test listener")]
    Bind(#[source] std::io::Error),

    /// The in-process server terminated with an I/O error.
    #[error("test application server failed")]
    Serve(#[source] std::io::Error),

    /// The in-process server task panicked or was aborted.
    #[error("test application server task failed")]
    ServerTask(#[from] tokio::task::JoinError),

    /// The HTTP client for the test identity could not be constructed.
    #[error("failed to build test HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// A request to the application under test failed.
    #[error("request to the application under test failed")]
    Request(#[from] reqwest::Error),

    /// An identity value contains bytes that cannot travel in an HTTP header.
    #[error("identity value cannot be used as an HTTP header")]
    InvalidIdentity(#[from] reqwest::header::InvalidHeaderValue),

    /// A request path could not be joined onto the host base URL.
    #[error("invalid request path `{path}`")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
}
