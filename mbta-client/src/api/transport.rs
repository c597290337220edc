//! HTTP transport.
//!
//! The client only needs "GET this URL with these query pairs and give me the
//! status and body". Keeping that behind a trait lets tests swap in
//! [`MockTransport`](super::MockTransport) without a server.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::MbtaError;

/// JSON:API media type.
pub const JSON_API: &str = "application/vnd.api+json";

/// Status and body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Something that can perform a GET request.
pub trait Transport: Send + Sync {
    /// Perform one GET. Only transport-level failures are errors; any HTTP
    /// status comes back as a [`RawResponse`].
    fn get(
        &self,
        url: &Url,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<RawResponse, MbtaError>> + Send;
}

/// Transport over a pooled `reqwest` client.
///
/// Uses a semaphore to cap requests in flight and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    semaphore: Arc<Semaphore>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url, query: &[(String, String)]) -> Result<RawResponse, MbtaError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MbtaError::TransportClosed)?;

        debug!(url = %url, params = query.len(), "GET");

        let response = self.http.get(url.clone()).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(url = %url, status, bytes = body.len(), "response");

        Ok(RawResponse { status, body })
    }
}
