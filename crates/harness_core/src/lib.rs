//! End-to-end integration-test harness for web applications.
//!
//! This crate provides the pieces an integration test composes:
//!
//! - [`IntegrationFixture`]: collection-scoped owner of the application host
//!   and fake-data generators.
//! - [`TestSession`]: per-test state — a lazily built authenticated HTTP
//!   client, an optional service scope, and a cancellable wait for the
//!   application's background queue to drain.
//! - [`QueueProber`]: the status interface the application under test
//!   registers so the harness can observe its background queue.
//! - [`FakeData`]: randomized or seeded test input values.
//!
//! A typical test boots an [`AxumAppHost`](app_host::AxumAppHost) once per
//! collection, wraps it in a fixture, and opens one session per test case.

use chrono::Utc;
use uuid::Uuid;

pub mod config;
pub mod errors;
pub mod fake_data;
pub mod fixture;
pub mod logging;
pub mod queue;
pub mod session;

// Re-export key types for convenience
pub use app_host::{
    AppHost, AxumAppHost, HostError, ResolveError, ServiceRegistry, ServiceRegistryBuilder,
    ServiceScope, TestClient, TestIdentity, USER_EMAIL_HEADER, USER_ID_HEADER,
};
pub use config::HarnessConfig;
pub use errors::HarnessError;
pub use fake_data::FakeData;
pub use fixture::IntegrationFixture;
pub use logging::init_test_logging;
pub use queue::QueueProber;
pub use session::{TestSession, CLIENT_EMAIL, CLIENT_USER_ID};

/// Generate a unique identifier for a test run.
///
/// Format: `{prefix}-{timestamp}-{random}`, e.g.
/// `widgets-20240108-120000-a1b2c3`. Useful for naming resources a test
/// creates in the application under test so overlapping runs never collide.
pub fn unique_test_id(prefix: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d-%H%M%S");
    let random_suffix = Uuid::new_v4().simple().to_string()[..6].to_lowercase();
    format!("{}-{}-{}", prefix, timestamp, random_suffix)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
