//! The application-host abstraction consumed by the harness.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::client::{TestClient, TestIdentity};
use crate::errors::HostError;
use crate::registry::ServiceRegistry;
use crate::scope::ServiceScope;

/// An in-process instance of the application under test.
///
/// A host exposes the application's service registry, mints per-test
/// resolution scopes, and builds HTTP clients bound to its listening
/// address. Hosts are shared read-only across sequential test sessions; only
/// [`shutdown`](AppHost::shutdown) mutates host state.
#[async_trait]
pub trait AppHost: Send + Sync {
    /// The application-wide service registry.
    fn services(&self) -> Arc<ServiceRegistry>;

    /// Mint a fresh resolution scope over the application services.
    fn create_scope(&self) -> ServiceScope {
        ServiceScope::new(self.services())
    }

    /// Base URL the application is listening on.
    fn base_url(&self) -> &Url;

    /// Build an HTTP client authenticated as `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidIdentity`] when the identity cannot be
    /// rendered as headers, or [`HostError::ClientBuild`] when the client
    /// cannot be constructed.
    fn test_client(
        &self,
        identity: &TestIdentity,
        timeout: Duration,
    ) -> Result<TestClient, HostError> {
        let headers = identity.as_headers()?;
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(HostError::ClientBuild)?;
        Ok(TestClient::new(http, self.base_url().clone()))
    }

    /// Stop the application and release its listener.
    ///
    /// Must be idempotent; repeated calls after the server has stopped are
    /// no-ops.
    async fn shutdown(&self) -> Result<(), HostError>;
}
