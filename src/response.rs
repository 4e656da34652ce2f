//! Normalized response descriptor.

use std::fmt;

use bytes::Bytes;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, HeaderMap};

use crate::content_range::{ContentRange, parse_content_range};
use crate::error::RangeRequestError;
use crate::transport::TransportResponse;

/// Uniform description of a HEAD or ranged response.
pub struct ResourceInfo {
    /// Final URL reported by the transport.
    pub url: String,
    /// HTTP status of the response.
    pub status: u16,
    /// Total resource size: the `Content-Range` instance length when that
    /// header is present, otherwise `Content-Length`.
    pub size: Option<u64>,
    /// `Content-Type` header value.
    pub mime_type: Option<String>,
    /// Parsed `Content-Range` header.
    pub content_range: Option<ContentRange>,
    /// True when the server advertised `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
    /// Deferred body of the response.
    pub body: ResponseBody,
}

impl ResourceInfo {
    /// Builds the descriptor from a response whose headers have arrived.
    ///
    /// No I/O happens here; the body stays unread inside [`ResponseBody`].
    pub(crate) fn from_response(response: Box<dyn TransportResponse>) -> Self {
        let headers = response.headers();
        let raw_range = header_str(headers, CONTENT_RANGE.as_str());
        let content_range = parse_content_range(raw_range);
        // On a partial response Content-Length is the part, never the resource.
        let size = match raw_range {
            Some(_) => content_range.and_then(|range| range.instance_length),
            None => content_length(headers),
        };
        let mime_type = header_str(headers, CONTENT_TYPE.as_str()).map(str::to_string);
        let accept_ranges = header_str(headers, ACCEPT_RANGES.as_str())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("bytes"));

        Self {
            url: response.url().to_string(),
            status: response.status().as_u16(),
            size,
            mime_type,
            content_range,
            accept_ranges,
            body: ResponseBody { response },
        }
    }

    /// Reads the full body into memory. Shorthand for `self.body.bytes()`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport raises while reading the body.
    pub async fn bytes(self) -> Result<Bytes, RangeRequestError> {
        self.body.bytes().await
    }
}

impl fmt::Debug for ResourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceInfo")
            .field("url", &self.url)
            .field("status", &self.status)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .field("content_range", &self.content_range)
            .field("accept_ranges", &self.accept_ranges)
            .finish_non_exhaustive()
    }
}

/// Owned handle to a still-open response body.
///
/// Must not outlive the transport that produced it; reading it consumes the
/// handle so the payload can be materialized at most once.
pub struct ResponseBody {
    response: Box<dyn TransportResponse>,
}

impl ResponseBody {
    /// Materializes the full payload.
    ///
    /// # Errors
    ///
    /// Returns whatever error the transport raises while reading the body.
    pub async fn bytes(self) -> Result<Bytes, RangeRequestError> {
        self.response.bytes().await
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("url", &self.response.url())
            .finish_non_exhaustive()
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    header_str(headers, CONTENT_LENGTH.as_str()).and_then(|v| v.trim().parse::<u64>().ok())
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use reqwest::header::HeaderValue;

    /// In-memory response used by unit tests across the crate.
    pub(crate) struct FakeResponse {
        pub status: StatusCode,
        pub url: String,
        pub headers: HeaderMap,
        pub body: Vec<u8>,
    }

    impl FakeResponse {
        pub(crate) fn new(status: u16, url: &str) -> Self {
            Self {
                status: StatusCode::from_u16(status).unwrap(),
                url: url.to_string(),
                headers: HeaderMap::new(),
                body: Vec::new(),
            }
        }

        pub(crate) fn header(mut self, name: &'static str, value: &str) -> Self {
            self.headers.insert(name, HeaderValue::from_str(value).unwrap());
            self
        }

        pub(crate) fn body(mut self, body: &[u8]) -> Self {
            self.body = body.to_vec();
            self
        }
    }

    #[async_trait]
    impl TransportResponse for FakeResponse {
        fn status(&self) -> StatusCode {
            self.status
        }

        fn url(&self) -> &str {
            &self.url
        }

        fn headers(&self) -> &HeaderMap {
            &self.headers
        }

        async fn bytes(self: Box<Self>) -> Result<Bytes, RangeRequestError> {
            Ok(Bytes::from(self.body))
        }
    }

    fn normalize(response: FakeResponse) -> ResourceInfo {
        ResourceInfo::from_response(Box::new(response))
    }

    #[test]
    fn test_size_from_content_range_instance_length() {
        let info = normalize(
            FakeResponse::new(206, "https://example.com/a")
                .header("content-range", "bytes 0-99/1000")
                .header("content-length", "100"),
        );
        assert_eq!(info.size, Some(1000));
        assert_eq!(
            info.content_range,
            Some(ContentRange {
                first_byte: 0,
                last_byte: 99,
                instance_length: Some(1000),
            })
        );
    }

    #[test]
    fn test_size_falls_back_to_content_length() {
        let info = normalize(
            FakeResponse::new(200, "https://example.com/a").header("content-length", "4096"),
        );
        assert_eq!(info.size, Some(4096));
        assert!(info.content_range.is_none());
    }

    #[test]
    fn test_unknown_instance_length_leaves_size_unset() {
        let info = normalize(
            FakeResponse::new(206, "https://example.com/a")
                .header("content-range", "bytes 0-99/*")
                .header("content-length", "100"),
        );
        assert_eq!(info.size, None);
        assert_eq!(
            info.content_range,
            Some(ContentRange {
                first_byte: 0,
                last_byte: 99,
                instance_length: None,
            })
        );
    }

    #[test]
    fn test_inconsistent_content_range_ignores_content_length() {
        let info = normalize(
            FakeResponse::new(206, "https://example.com/a")
                .header("content-range", "bytes 0-99/50")
                .header("content-length", "100"),
        );
        assert!(info.content_range.is_none());
        assert_eq!(info.size, None);
    }

    #[test]
    fn test_size_absent_without_headers() {
        let info = normalize(FakeResponse::new(200, "https://example.com/a"));
        assert_eq!(info.size, None);
        assert!(info.content_range.is_none());
        assert!(info.mime_type.is_none());
        assert!(!info.accept_ranges);
    }

    #[test]
    fn test_unparseable_content_length_is_absent() {
        let info = normalize(
            FakeResponse::new(200, "https://example.com/a").header("content-length", "lots"),
        );
        assert_eq!(info.size, None);
    }

    #[test]
    fn test_captures_url_status_mime_and_accept_ranges() {
        let info = normalize(
            FakeResponse::new(500, "https://cdn.example.com/final.mp3")
                .header("content-type", "audio/mpeg")
                .header("accept-ranges", "Bytes"),
        );
        assert_eq!(info.url, "https://cdn.example.com/final.mp3");
        assert_eq!(info.status, 500);
        assert_eq!(info.mime_type.as_deref(), Some("audio/mpeg"));
        assert!(info.accept_ranges);
    }

    #[test]
    fn test_debug_omits_body() {
        let info = normalize(FakeResponse::new(200, "https://example.com/a").body(b"secret"));
        let rendered = format!("{info:?}");
        assert!(rendered.contains("https://example.com/a"));
        assert!(!rendered.contains("secret"));
    }

    #[tokio::test]
    async fn test_body_is_materialized_on_demand() {
        let info = normalize(FakeResponse::new(200, "https://example.com/a").body(b"payload"));
        let bytes = info.bytes().await.unwrap();
        assert_eq!(&bytes[..], b"payload");
    }
}
