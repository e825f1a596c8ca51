//! Application hosting for end-to-end integration tests.
//!
//! This crate owns everything the test harness needs from the application
//! under test: a type-keyed [`ServiceRegistry`] with per-test
//! [`ServiceScope`]s, a synthetic [`TestIdentity`] carried in request
//! headers, an authenticated [`TestClient`], and the [`AppHost`] trait with
//! its in-process axum implementation, [`AxumAppHost`].
//!
//! This crate never depends on the harness; the dependency flows
//! Harness → Host, never the reverse.

pub mod client;
pub mod errors;
pub mod host;
pub mod registry;
pub mod scope;
pub mod server;

// Re-export key types for convenience
pub use client::{TestClient, TestIdentity, USER_EMAIL_HEADER, USER_ID_HEADER};
pub use errors::{HostError, ResolveError};
pub use host::AppHost;
pub use registry::{ServiceRegistry, ServiceRegistryBuilder};
pub use scope::ServiceScope;
pub use server::AxumAppHost;
