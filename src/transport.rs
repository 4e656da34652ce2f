//! HTTP transport seam.
//!
//! [`RangeHttpClient`](crate::RangeHttpClient) only needs "send a request,
//! look at status, final URL and headers, then maybe read the body". That
//! capability is expressed by [`HttpTransport`] and [`TransportResponse`] so
//! the client can run over `reqwest` or over any other stack (or a test fake).

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, instrument};

use crate::error::RangeRequestError;
use crate::user_agent;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes, ranged bodies can be large).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Something that can send a single HTTP request.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `method` to `url` with `headers` and returns once response
    /// headers are available. Status codes are not interpreted here.
    async fn request(
        &self,
        url: &str,
        method: Method,
        headers: HeaderMap,
    ) -> Result<Box<dyn TransportResponse>, RangeRequestError>;
}

/// A response whose headers have arrived and whose body has not been read.
///
/// The handle keeps the underlying response open; drop it to release the
/// connection without reading the body.
#[async_trait]
pub trait TransportResponse: Send {
    /// Response status.
    fn status(&self) -> StatusCode;

    /// Final URL after redirects.
    fn url(&self) -> &str;

    /// Response headers.
    fn headers(&self) -> &HeaderMap;

    /// Reads the whole body into memory. Consumes the response.
    async fn bytes(self: Box<Self>) -> Result<Bytes, RangeRequestError>;
}

/// [`HttpTransport`] backed by a `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Creates a transport with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a transport with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = build_client(connect_timeout_secs, read_timeout_secs)
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Wraps an already configured client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(level = "debug", skip_all, fields(url = %url, method = %method))]
    async fn request(
        &self,
        url: &str,
        method: Method,
        headers: HeaderMap,
    ) -> Result<Box<dyn TransportResponse>, RangeRequestError> {
        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| RangeRequestError::network(url, e))?;

        debug!(
            status = response.status().as_u16(),
            final_url = %response.url(),
            "response headers received"
        );

        Ok(Box::new(ReqwestResponse::new(response)))
    }
}

/// [`TransportResponse`] over a live `reqwest::Response`.
struct ReqwestResponse {
    url: String,
    response: reqwest::Response,
}

impl ReqwestResponse {
    fn new(response: reqwest::Response) -> Self {
        Self {
            url: response.url().to_string(),
            response,
        }
    }
}

#[async_trait]
impl TransportResponse for ReqwestResponse {
    fn status(&self) -> StatusCode {
        self.response.status()
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    async fn bytes(self: Box<Self>) -> Result<Bytes, RangeRequestError> {
        let Self { url, response } = *self;
        response
            .bytes()
            .await
            .map_err(|e| RangeRequestError::network(url, e))
    }
}

fn build_client(
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(read_timeout_secs))
        .user_agent(user_agent::default_user_agent())
        .build()
}
