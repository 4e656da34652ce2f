//! HEAD probe and ranged GET against a single remote resource.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue, RANGE};
use tracing::{debug, instrument, warn};

use crate::config::{ClientConfig, ClientOptions};
use crate::error::RangeRequestError;
use crate::response::ResourceInfo;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Operations a random-access reader needs from an HTTP resource.
#[async_trait]
pub trait RangeRequestClient: Send + Sync {
    /// Probes the resource with a HEAD request.
    async fn get_head_info(&self) -> Result<ResourceInfo, RangeRequestError>;

    /// Requests the inclusive byte range `range.0..=range.1` using `method`.
    async fn get_response(
        &self,
        method: &str,
        range: (u64, u64),
    ) -> Result<ResourceInfo, RangeRequestError>;
}

/// Range-request client bound to one target URL.
///
/// Create one per remote resource and reuse it for any number of requests.
/// With [`ClientConfig::resolve_url`] enabled, the final URL reported after
/// redirects is remembered and targeted by later ranged requests.
///
/// # Example
///
/// ```no_run
/// use range_http_client::{ClientOptions, RangeHttpClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RangeHttpClient::new(
///     "https://example.com/track.mp3",
///     Some(ClientOptions::default().resolve_url(true)),
/// );
/// let head = client.get_head_info().await?;
/// println!("size: {:?}", head.size);
///
/// let first_kb = client.get_response("GET", (0, 1023)).await?;
/// let bytes = first_kb.bytes().await?;
/// println!("read {} bytes", bytes.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RangeHttpClient<T = ReqwestTransport> {
    url: String,
    config: ClientConfig,
    resolved_url: RwLock<Option<String>>,
    transport: T,
}

impl RangeHttpClient<ReqwestTransport> {
    /// Creates a client for `url` over the default reqwest transport.
    ///
    /// # Panics
    ///
    /// Panics if the default HTTP client cannot be built. See
    /// [`ReqwestTransport::new`].
    #[must_use]
    pub fn new(url: impl Into<String>, options: Option<ClientOptions>) -> Self {
        Self::with_transport(url, options, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> RangeHttpClient<T> {
    /// Creates a client for `url` over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(
        url: impl Into<String>,
        options: Option<ClientOptions>,
        transport: T,
    ) -> Self {
        Self {
            url: url.into(),
            config: ClientConfig::from(options),
            resolved_url: RwLock::new(None),
            transport,
        }
    }

    /// The original target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The resolved configuration.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        self.config
    }

    /// The redirect-resolved URL, once one has been observed.
    ///
    /// Always `None` unless `resolve_url` is enabled.
    #[must_use]
    pub fn resolved_url(&self) -> Option<String> {
        self.resolved_url
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Sends a HEAD request to the original URL.
    ///
    /// The status code is not checked: error responses are normalized and
    /// returned like any other so callers can still read their headers.
    ///
    /// # Errors
    ///
    /// Returns [`RangeRequestError`] only when the transport itself fails.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn get_head_info(&self) -> Result<ResourceInfo, RangeRequestError> {
        let response = self
            .transport
            .request(&self.url, Method::HEAD, HeaderMap::new())
            .await?;

        self.record_resolved_url(response.url());
        let info = ResourceInfo::from_response(response);
        debug!(status = info.status, size = ?info.size, "HEAD complete");
        Ok(info)
    }

    /// Requests the inclusive byte range `start..=end`.
    ///
    /// Targets the resolved URL when one has been recorded, otherwise the
    /// original URL.
    ///
    /// # Errors
    ///
    /// - [`RangeRequestError::InvalidMethod`] if `method` is not a valid token
    /// - [`RangeRequestError::HttpStatus`] if the response status is not 2xx
    /// - any transport failure, unchanged
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn get_response(
        &self,
        method: &str,
        range: (u64, u64),
    ) -> Result<ResourceInfo, RangeRequestError> {
        let (start, end) = range;
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| RangeRequestError::invalid_method(method))?;
        let target = self.resolved_url().unwrap_or_else(|| self.url.clone());
        debug!(%method, start, end, target = %target, "requesting range");

        let mut headers = HeaderMap::new();
        headers.insert(RANGE, range_header_value(start, end));

        let response = self.transport.request(&target, method, headers).await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), target = %target, "range request rejected");
            return Err(RangeRequestError::http_status(target, status.as_u16()));
        }

        self.record_resolved_url(response.url());
        Ok(ResourceInfo::from_response(response))
    }

    fn record_resolved_url(&self, final_url: &str) {
        if !self.config.resolve_url {
            return;
        }
        let mut guard = self
            .resolved_url
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if guard.as_deref() != Some(final_url) {
            debug!(resolved_url = %final_url, "recorded resolved URL");
            *guard = Some(final_url.to_string());
        }
    }
}

#[async_trait]
impl<T: HttpTransport> RangeRequestClient for RangeHttpClient<T> {
    async fn get_head_info(&self) -> Result<ResourceInfo, RangeRequestError> {
        RangeHttpClient::get_head_info(self).await
    }

    async fn get_response(
        &self,
        method: &str,
        range: (u64, u64),
    ) -> Result<ResourceInfo, RangeRequestError> {
        RangeHttpClient::get_response(self, method, range).await
    }
}

/// Formats `bytes=<start>-<end>`.
#[allow(clippy::expect_used)]
fn range_header_value(start: u64, end: u64) -> HeaderValue {
    // Digits, '=' and '-' are always valid header bytes.
    HeaderValue::from_str(&format!("bytes={start}-{end}")).expect("range header is ASCII")
}
