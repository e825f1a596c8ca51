//! Authenticated HTTP client for the application under test.
//!
//! Tests authenticate by carrying a synthetic identity in request headers;
//! the application under test is expected to trust these headers in its test
//! configuration. The identity is baked into the client's default headers so
//! every request a test makes is authenticated without further ceremony.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Response;
use serde::Serialize;
use url::Url;

use crate::errors::HostError;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Header carrying the synthetic user id.
pub const USER_ID_HEADER: &str = "x-test-user-id";

/// Header carrying the synthetic user email.
pub const USER_EMAIL_HEADER: &str = "x-test-user-email";

/// The synthetic user a test client impersonates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIdentity {
    pub user_id: String,
    pub email: String,
}

impl TestIdentity {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }

    /// Render the identity as default request headers.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidIdentity`] when a value contains bytes
    /// that are not legal in an HTTP header.
    pub fn as_headers(&self) -> Result<HeaderMap, HostError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_str(&self.user_id)?);
        headers.insert(USER_EMAIL_HEADER, HeaderValue::from_str(&self.email)?);
        Ok(headers)
    }
}

/// HTTP client bound to an in-process application host.
///
/// Wraps a `reqwest` client whose default headers carry a [`TestIdentity`],
/// and joins relative paths onto the host's base URL.
#[derive(Debug, Clone)]
pub struct TestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TestClient {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Base URL of the application under test.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying `reqwest` client, for requests the helpers don't cover.
    pub fn inner(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve a path relative to the host base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidPath`] when the path cannot be joined
    /// onto the base URL.
    pub fn url(&self, path: &str) -> Result<Url, HostError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| HostError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }

    /// Send a GET request to `path`.
    pub async fn get(&self, path: &str) -> Result<Response, HostError> {
        Ok(self.http.get(self.url(path)?).send().await?)
    }

    /// Send a POST request with a JSON body to `path`.
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Response, HostError>
    where
        B: Serialize + ?Sized,
    {
        Ok(self.http.post(self.url(path)?).json(body).send().await?)
    }

    /// Send a DELETE request to `path`.
    pub async fn delete(&self, path: &str) -> Result<Response, HostError> {
        Ok(self.http.delete(self.url(path)?).send().await?)
    }
}
