//! Shared test support: a small axum application under test and an
//! in-memory background queue.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use harness_core::{
    AxumAppHost, HarnessConfig, IntegrationFixture, QueueProber, ServiceRegistryBuilder,
    USER_EMAIL_HEADER, USER_ID_HEADER,
};

/// Background queue whose jobs are plain timed tasks.
pub struct InMemoryQueue {
    in_flight: AtomicUsize,
}

impl InMemoryQueue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            in_flight: AtomicUsize::new(0),
        })
    }

    /// Start a job that completes after `duration`.
    pub fn run_job(self: &Arc<Self>, duration: Duration) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let queue = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            queue.in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueueProber for InMemoryQueue {
    async fn is_processing(&self, _cancel: &CancellationToken) -> anyhow::Result<bool> {
        Ok(self.in_flight() > 0)
    }
}

/// Per-test note store, registered as a scoped service.
#[derive(Default)]
pub struct NoteStore {
    notes: std::sync::Mutex<Vec<String>>,
}

impl NoteStore {
    pub fn add(&self, note: impl Into<String>) {
        self.notes.lock().unwrap().push(note.into());
    }

    pub fn len(&self) -> usize {
        self.notes.lock().unwrap().len()
    }
}

async fn whoami(headers: HeaderMap) -> Json<serde_json::Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    Json(json!({
        "user_id": header(USER_ID_HEADER),
        "email": header(USER_EMAIL_HEADER),
    }))
}

async fn echo(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    Json(body)
}

/// The application under test: ping, identity echo, body echo, and a
/// delete-style reset.
pub fn demo_router() -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/whoami", get(whoami))
        .route("/echo", post(echo))
        .route("/reset", delete(|| async { StatusCode::NO_CONTENT }))
}

/// Boot the demo application and wrap it in a fixture with a fast poll
/// interval so timing-sensitive tests stay quick.
pub async fn start_fixture(queue: Arc<InMemoryQueue>) -> anyhow::Result<Arc<IntegrationFixture>> {
    let services = ServiceRegistryBuilder::new()
        .register_arc::<dyn QueueProber>(queue)
        .register_scoped::<NoteStore, _>(|| Arc::new(NoteStore::default()))
        .register("demo-app".to_string())
        .build();

    let host = AxumAppHost::start(demo_router(), services).await?;
    let config = HarnessConfig {
        queue_poll_interval: Duration::from_millis(10),
        client_timeout: Duration::from_secs(5),
    };

    Ok(Arc::new(IntegrationFixture::with_config(
        Arc::new(host),
        config,
    )))
}
