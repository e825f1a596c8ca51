//! Background-queue status probing.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Reports whether asynchronous background work is still in flight.
///
/// The application under test registers an implementation of this trait in
/// its service registry (as `dyn QueueProber`); the harness resolves it to
/// drive [`TestSession::wait_on_queue_to_empty`](crate::TestSession::wait_on_queue_to_empty).
#[async_trait]
pub trait QueueProber: Send + Sync {
    /// Whether the background queue is currently processing work.
    ///
    /// Implementations should honor `cancel` if the check itself can block.
    async fn is_processing(&self, cancel: &CancellationToken) -> anyhow::Result<bool>;
}
