//! In-process axum host for the application under test.
//!
//! This module provides the default [`AppHost`] implementation: it binds an
//! ephemeral loopback port, serves the application's router on a background
//! task, and shuts the server down gracefully when the fixture is torn down.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::errors::HostError;
use crate::host::AppHost;
use crate::registry::ServiceRegistry;

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// An application under test hosted on an ephemeral loopback port.
pub struct AxumAppHost {
    services: Arc<ServiceRegistry>,
    base_url: Url,
    shutdown_token: CancellationToken,
    server: Mutex<Option<JoinHandle<Result<(), std::io::Error>>>>,
}

impl AxumAppHost {
    /// Bind a loopback listener and start serving `router`.
    ///
    /// The port is chosen by the operating system, so any number of hosts
    /// can run concurrently within one test process.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Bind`] if the listener cannot be bound.
    pub async fn start(router: Router, services: ServiceRegistry) -> Result<Self, HostError> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .map_err(HostError::Bind)?;
        let addr = listener.local_addr().map_err(HostError::Bind)?;
        let base_url = Url::parse(&format!("http://{addr}/")).map_err(|source| {
            HostError::InvalidPath {
                path: addr.to_string(),
                source,
            }
        })?;

        let shutdown_token = CancellationToken::new();
        let signal = shutdown_token.clone();
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { signal.cancelled().await })
                .await
        });

        tracing::info!(%addr, "test application host listening");

        Ok(Self {
            services: Arc::new(services),
            base_url,
            shutdown_token,
            server: Mutex::new(Some(server)),
        })
    }

    /// Address the host is listening on, e.g. for raw socket clients.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl AppHost for AxumAppHost {
    fn services(&self) -> Arc<ServiceRegistry> {
        Arc::clone(&self.services)
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn shutdown(&self) -> Result<(), HostError> {
        self.shutdown_token.cancel();

        let handle = self.server.lock().await.take();
        if let Some(handle) = handle {
            handle.await?.map_err(HostError::Serve)?;
            tracing::info!("test application host stopped");
        }

        Ok(())
    }
}

impl std::fmt::Debug for AxumAppHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxumAppHost")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
