// --- File: crates/mobilify_testkit/src/transport.rs ---

//! Transport seam of the test kit.
//!
//! Scenario code builds plain `http` requests; a [`Transport`] decides how
//! they reach the adapter. [`RouterTransport`] drives an in-process axum
//! router, [`HttpTransport`] a deployed adapter through the shared reqwest
//! client.

use crate::error::TestkitError;
use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::Router;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use mobilify_common::HTTP_CLIENT;
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use tracing::error;

/// Status and raw body of an adapter response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiResponse {
    /// Parses the body as JSON. Parse failures are logged with the offending
    /// body before they propagate.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestkitError> {
        serde_json::from_slice(&self.body).map_err(|err| {
            error!(
                "failed to parse response body: {err}; body was {:?}",
                String::from_utf8_lossy(&self.body)
            );
            TestkitError::Parse(err)
        })
    }
}

/// How requests reach the adapter under test.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request<String>) -> Result<ApiResponse, TestkitError>;
}

/// In-process transport over an axum router, one `oneshot` call per
/// request. Routers clone cheaply, so a single transport carries a whole
/// scenario sequence.
pub struct RouterTransport {
    router: Router,
}

impl RouterTransport {
    pub fn new(router: Router) -> Self {
        RouterTransport { router }
    }
}

#[async_trait]
impl Transport for RouterTransport {
    async fn send(&self, request: Request<String>) -> Result<ApiResponse, TestkitError> {
        let (parts, body) = request.into_parts();
        let request = Request::from_parts(parts, Body::from(body));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|err| TestkitError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|err| TestkitError::Transport(err.to_string()))?
            .to_bytes();

        Ok(ApiResponse { status, body })
    }
}

/// Transport against a deployed adapter. Request paths resolve against the
/// configured base URL.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, HTTP_CLIENT.clone())
    }

    /// Same, over a separately configured client (custom timeouts, mostly).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        HttpTransport { base_url, client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request<String>) -> Result<ApiResponse, TestkitError> {
        let url = format!("{}{}", self.base_url, request.uri());

        let mut builder = self.client.request(request.method().clone(), url);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        let body = request.into_body();
        if !body.is_empty() {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(ApiResponse { status, body })
    }
}
