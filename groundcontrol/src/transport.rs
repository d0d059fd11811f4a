//! The injectable HTTP transport and its default reqwest implementation.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{GroundControlConfig, GroundControlError, Result};

/// A single outbound HTTP request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully built URL, query string included.
    pub url: Url,
    /// Request headers as name/value pairs.
    pub headers: Vec<(String, String)>,
}

impl TransportRequest {
    /// Create a GET request for the given URL.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: Vec::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set bearer authentication.
    pub fn bearer_auth(self, token: impl Into<String>) -> Self {
        self.header("authorization", format!("Bearer {}", token.into()))
    }
}

/// An HTTP response as the fetcher sees it: status plus raw body bytes.
#[derive(Debug)]
pub struct TransportResponse {
    status: StatusCode,
    body: Bytes,
}

impl TransportResponse {
    /// Create a response from a status code and body.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Get the HTTP status text, e.g. `Not Found` for 404.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown Error")
    }
}

/// The HTTP-fetch capability the client dispatches through.
///
/// The default implementation is [`HttpTransport`]; tests and embedders may
/// inject their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request, returning the status and body.
    ///
    /// Implementations should only fail for network-level problems; non-2xx
    /// responses are returned as ordinary [`TransportResponse`]s.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Default transport backed by [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &GroundControlConfig) -> Self {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { inner }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self.inner.request(request.method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GroundControlError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GroundControlError::Transport(e.to_string()))?;

        Ok(TransportResponse::new(status, body))
    }
}
