//! Per-test integration session.

use std::sync::{Arc, OnceLock};

use app_host::{ServiceScope, TestClient, TestIdentity};
use tokio::sync::OnceCell;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::HarnessError;
use crate::fake_data::FakeData;
use crate::fixture::IntegrationFixture;
use crate::queue::QueueProber;

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

/// User id every test client authenticates as.
pub const CLIENT_USER_ID: &str = "test913b-92d7-4c3e-8f29-5c61c4b9d2fa";

/// Email address every test client authenticates as.
pub const CLIENT_EMAIL: &str = "test@example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Created,
    Initialized,
    Disposed,
}

/// One end-to-end test's view of the application under test.
///
/// A session composes the shared [`IntegrationFixture`] with per-test state:
/// a lazily built authenticated HTTP client, an optional service scope, and
/// the queue-drain wait. Lifecycle runs `Created → Initialized → Disposed`;
/// there is no way back out of `Disposed`.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use harness_core::{IntegrationFixture, TestSession};
/// # use tokio_util::sync::CancellationToken;
/// # async fn example(fixture: Arc<IntegrationFixture>) -> anyhow::Result<()> {
/// let mut session = TestSession::new(fixture);
/// session.initialize()?;
///
/// let response = session.client().await?.get("/api/widgets").await?;
/// session.wait_on_queue_to_empty(&CancellationToken::new()).await?;
///
/// session.dispose();
/// # Ok(())
/// # }
/// ```
pub struct TestSession {
    fixture: Arc<IntegrationFixture>,
    state: SessionState,
    client: OnceCell<TestClient>,
    scope: Option<ServiceScope>,
    queue_probe: OnceLock<Arc<dyn QueueProber>>,
}

impl TestSession {
    /// Create a session over a shared fixture. Call
    /// [`initialize`](Self::initialize) before using the client.
    pub fn new(fixture: Arc<IntegrationFixture>) -> Self {
        Self {
            fixture,
            state: SessionState::Created,
            client: OnceCell::new(),
            scope: None,
            queue_probe: OnceLock::new(),
        }
    }

    /// Lifecycle hook run at test start.
    ///
    /// Idempotent in effect; the client itself is still built lazily on
    /// first access.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Disposed`] when called after
    /// [`dispose`](Self::dispose).
    pub fn initialize(&mut self) -> Result<(), HarnessError> {
        if self.state == SessionState::Disposed {
            return Err(HarnessError::Disposed);
        }
        self.state = SessionState::Initialized;
        Ok(())
    }

    /// The authenticated HTTP client for this session.
    ///
    /// Built on first access and reused afterwards; every call after
    /// initialization returns the same client.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::NotInitialized`] before
    /// [`initialize`](Self::initialize), [`HarnessError::Disposed`] after
    /// [`dispose`](Self::dispose), and [`HarnessError::Host`] when the
    /// client cannot be built.
    pub async fn client(&self) -> Result<&TestClient, HarnessError> {
        match self.state {
            SessionState::Created => return Err(HarnessError::NotInitialized),
            SessionState::Disposed => return Err(HarnessError::Disposed),
            SessionState::Initialized => {}
        }

        let client = self
            .client
            .get_or_try_init(|| async {
                debug!(user_id = CLIENT_USER_ID, "building authenticated test client");
                let identity = TestIdentity::new(CLIENT_USER_ID, CLIENT_EMAIL);
                self.fixture
                    .host()
                    .test_client(&identity, self.fixture.config().client_timeout)
            })
            .await?;

        Ok(client)
    }

    /// Resolve a service from the application.
    ///
    /// With `scoped = false` the service comes from the application-wide
    /// registry. With `scoped = true` it comes from this session's scope,
    /// creating the scope first if none exists.
    ///
    /// # Errors
    ///
    /// Propagates the registry's [`ResolveError`](app_host::ResolveError)
    /// unchanged when the type was never registered.
    pub fn resolve<T>(&mut self, scoped: bool) -> Result<Arc<T>, HarnessError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if !scoped {
            return self
                .fixture
                .host()
                .services()
                .get::<T>()
                .map_err(HarnessError::from);
        }

        let fixture = &self.fixture;
        let scope = self.scope.get_or_insert_with(|| {
            let scope = fixture.host().create_scope();
            debug!(scope_id = %scope.id(), "created service scope on first scoped resolve");
            scope
        });
        scope.get::<T>().map_err(HarnessError::from)
    }

    /// Replace the current scope with a fresh one.
    ///
    /// Any previous scope is dropped along with the instances it owned.
    pub fn create_scope(&mut self) {
        let scope = self.fixture.host().create_scope();
        debug!(scope_id = %scope.id(), "created new service scope");
        self.scope = Some(scope);
    }

    /// The current scope, if one exists.
    pub fn scope(&self) -> Option<&ServiceScope> {
        self.scope.as_ref()
    }

    /// The shared fixture this session runs on.
    pub fn fixture(&self) -> &Arc<IntegrationFixture> {
        &self.fixture
    }

    /// Fake-data generators, shared across the fixture.
    pub fn fake(&self) -> &FakeData {
        self.fixture.fake()
    }

    /// Block until the background queue reports idle.
    ///
    /// Polls the registered [`QueueProber`] at the configured interval
    /// (500 ms unless overridden). Returns immediately, without sleeping,
    /// when the first probe reports idle. There is no iteration bound;
    /// callers bound wall-clock time through `cancel`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::WaitCancelled`] when `cancel` fires —
    /// including before the first probe for a pre-cancelled token —
    /// [`HarnessError::Resolve`] when no `dyn QueueProber` is registered,
    /// and [`HarnessError::Probe`] when the prober itself fails.
    pub async fn wait_on_queue_to_empty(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), HarnessError> {
        let probe = self.queue_probe()?;
        let poll_interval = self.fixture.config().queue_poll_interval;

        loop {
            if cancel.is_cancelled() {
                return Err(HarnessError::WaitCancelled);
            }

            let processing = tokio::select! {
                () = cancel.cancelled() => return Err(HarnessError::WaitCancelled),
                result = probe.is_processing(cancel) => result.map_err(HarnessError::Probe)?,
            };

            if !processing {
                debug!("background queue is empty; continuing");
                return Ok(());
            }

            debug!(
                delay_ms = poll_interval.as_millis() as u64,
                "background queue emptying..."
            );
            tokio::select! {
                () = cancel.cancelled() => return Err(HarnessError::WaitCancelled),
                () = sleep(poll_interval) => {}
            }
        }
    }

    /// Lifecycle hook run at test teardown.
    ///
    /// Releases the HTTP client if one was built and drops the current
    /// scope. Best effort: intended to run once per session, though extra
    /// calls find nothing left to release.
    pub fn dispose(&mut self) {
        if let Some(scope) = self.scope.take() {
            debug!(scope_id = %scope.id(), "dropping service scope");
        }
        if self.client.take().is_some() {
            debug!("released authenticated test client");
        }
        self.state = SessionState::Disposed;
    }

    fn queue_probe(&self) -> Result<Arc<dyn QueueProber>, HarnessError> {
        if let Some(probe) = self.queue_probe.get() {
            return Ok(Arc::clone(probe));
        }
        let probe = self
            .fixture
            .host()
            .services()
            .get::<dyn QueueProber>()?;
        Ok(Arc::clone(self.queue_probe.get_or_init(|| probe)))
    }
}

impl std::fmt::Debug for TestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSession")
            .field("state", &self.state)
            .field("has_scope", &self.scope.is_some())
            .finish()
    }
}
