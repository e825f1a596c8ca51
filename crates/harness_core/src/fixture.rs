//! Collection-scoped test fixture.

use std::sync::Arc;

use app_host::AppHost;

use crate::config::HarnessConfig;
use crate::errors::HarnessError;
use crate::fake_data::FakeData;

/// Shared, longer-lived resources for a collection of tests.
///
/// The fixture owns the application host and the fake-data generators, and
/// outlives individual [`TestSession`](crate::TestSession)s. It is read-only
/// after construction, so sequential sessions can share one fixture behind
/// an `Arc` without coordination.
pub struct IntegrationFixture {
    host: Arc<dyn AppHost>,
    fake: FakeData,
    config: HarnessConfig,
}

impl IntegrationFixture {
    /// Wrap a running host, loading configuration from the environment.
    pub fn new(host: Arc<dyn AppHost>) -> Self {
        Self::with_config(host, HarnessConfig::from_env())
    }

    /// Wrap a running host with an explicit configuration.
    pub fn with_config(host: Arc<dyn AppHost>, config: HarnessConfig) -> Self {
        Self {
            host,
            fake: FakeData::new(),
            config,
        }
    }

    /// Replace the fake-data generator, e.g. with a seeded one.
    #[must_use]
    pub fn with_fake(mut self, fake: FakeData) -> Self {
        self.fake = fake;
        self
    }

    /// The application host under test.
    pub fn host(&self) -> &dyn AppHost {
        self.host.as_ref()
    }

    /// Fake-data generators shared by every session on this fixture.
    pub fn fake(&self) -> &FakeData {
        &self.fake
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Tear down the application host.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the host shutdown.
    pub async fn shutdown(&self) -> Result<(), HarnessError> {
        self.host.shutdown().await.map_err(HarnessError::from)
    }
}

impl std::fmt::Debug for IntegrationFixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationFixture")
            .field("base_url", &self.host.base_url().as_str())
            .field("config", &self.config)
            .finish()
    }
}
