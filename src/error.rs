//! Error types for range requests.
//!
//! Transport failures are surfaced with the URL that was being requested.
//! The only locally synthesized failure is [`RangeRequestError::HttpStatus`],
//! raised when a ranged request comes back with a non-2xx status.

use thiserror::Error;

/// Errors that can occur while issuing HEAD or ranged requests.
#[derive(Debug, Error)]
pub enum RangeRequestError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that was being requested.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Ranged request answered with a non-success status.
    #[error("unexpected HTTP response status={status} for {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The method string is not a valid HTTP method token.
    #[error("invalid HTTP method: {method:?}")]
    InvalidMethod {
        /// The rejected method string.
        method: String,
    },

    /// Failure reported by a custom [`HttpTransport`](crate::HttpTransport).
    #[error("transport error requesting {url}: {source}")]
    Transport {
        /// The URL that was being requested.
        url: String,
        /// The transport-specific error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RangeRequestError {
    /// Creates a network error from a reqwest error.
    ///
    /// Timeouts are promoted to [`RangeRequestError::Timeout`].
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::timeout(url);
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid method error.
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod {
            method: method.into(),
        }
    }

    /// Wraps an error raised by a custom transport.
    pub fn transport(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Returns true for errors raised because of a non-2xx status.
    #[must_use]
    pub fn is_http_status(&self) -> bool {
        matches!(self, Self::HttpStatus { .. })
    }

    /// Returns the HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// No `From<reqwest::Error>`: every variant needs the requested URL, which the
// source error does not reliably carry. Use the constructors above.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_contains_code() {
        let error = RangeRequestError::http_status("https://example.com/a.mp3", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(msg.contains("status=404"), "Expected status=404 in: {msg}");
        assert!(
            msg.contains("https://example.com/a.mp3"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_http_status_accessors() {
        let error = RangeRequestError::http_status("https://example.com", 416);
        assert!(error.is_http_status());
        assert_eq!(error.status(), Some(416));

        let error = RangeRequestError::timeout("https://example.com");
        assert!(!error.is_http_status());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_invalid_method_display() {
        let error = RangeRequestError::invalid_method("GE T");
        assert!(error.to_string().contains("\"GE T\""));
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let error = RangeRequestError::transport("https://example.com/x", io);
        let msg = error.to_string();
        assert!(msg.contains("reset by peer"), "Expected source in: {msg}");
        assert!(std::error::Error::source(&error).is_some());
    }
}
