//! Client configuration.
//!
//! Callers pass a partial [`ClientOptions`]; every unset field is resolved to
//! its default once, at construction, producing an immutable [`ClientConfig`].

use serde::Deserialize;

/// Default for [`ClientConfig::resolve_url`].
pub const DEFAULT_RESOLVE_URL: bool = false;

/// Partial configuration supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientOptions {
    /// Record the redirect-resolved URL and target it on later requests.
    pub resolve_url: Option<bool>,
}

impl ClientOptions {
    /// Sets `resolve_url`.
    #[must_use]
    pub fn resolve_url(mut self, enabled: bool) -> Self {
        self.resolve_url = Some(enabled);
        self
    }
}

/// Fully resolved client configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// When true, the final URL reported by the transport is recorded and
    /// used for subsequent ranged requests.
    pub resolve_url: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            resolve_url: DEFAULT_RESOLVE_URL,
        }
    }
}

impl ClientConfig {
    /// Resolves caller options against the defaults.
    #[must_use]
    pub fn from_options(options: ClientOptions) -> Self {
        let defaults = Self::default();
        Self {
            resolve_url: options.resolve_url.unwrap_or(defaults.resolve_url),
        }
    }
}

impl From<ClientOptions> for ClientConfig {
    fn from(options: ClientOptions) -> Self {
        Self::from_options(options)
    }
}

impl From<Option<ClientOptions>> for ClientConfig {
    fn from(options: Option<ClientOptions>) -> Self {
        Self::from_options(options.unwrap_or_default())
    }
}
