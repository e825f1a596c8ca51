//! Tests for the in-process axum host.

use std::time::Duration;

use axum::routing::get;
use axum::Router;

use super::*;
use crate::client::TestIdentity;
use crate::registry::ServiceRegistryBuilder;

fn ping_router() -> Router {
    Router::new().route("/ping", get(|| async { "pong" }))
}

async fn start_ping_host() -> AxumAppHost {
    AxumAppHost::start(ping_router(), ServiceRegistryBuilder::new().build())
        .await
        .expect("host should start on an ephemeral port")
}

#[tokio::test]
async fn host_serves_requests_on_an_ephemeral_port() {
    let host = start_ping_host().await;

    let identity = TestIdentity::new("user", "user@example.com");
    let client = host
        .test_client(&identity, Duration::from_secs(5))
        .unwrap();
    let response = client.get("/ping").await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "pong");

    host.shutdown().await.unwrap();
}

#[tokio::test]
async fn two_hosts_bind_distinct_ports() {
    let one = start_ping_host().await;
    let two = start_ping_host().await;

    assert_ne!(
        AppHost::base_url(&one).port(),
        AppHost::base_url(&two).port()
    );

    one.shutdown().await.unwrap();
    two.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_is_idempotent() {
    let host = start_ping_host().await;

    host.shutdown().await.unwrap();
    host.shutdown().await.unwrap();
}

#[tokio::test]
async fn requests_fail_after_shutdown() {
    let host = start_ping_host().await;
    let identity = TestIdentity::new("user", "user@example.com");
    let client = host
        .test_client(&identity, Duration::from_secs(1))
        .unwrap();

    host.shutdown().await.unwrap();

    assert!(client.get("/ping").await.is_err());
}
