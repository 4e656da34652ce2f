//! Range HTTP Client Library
//!
//! Issues HTTP HEAD and ranged GET requests against a remote resource and
//! normalizes each response into a [`ResourceInfo`]: size, mime type, parsed
//! `Content-Range`, and a body that is only read when asked for. A streaming
//! reader can use it to treat a remote resource as a randomly addressable
//! byte source.
//!
//! # Architecture
//!
//! - [`client`] - [`RangeHttpClient`] and the [`RangeRequestClient`] trait
//! - [`config`] - Caller options resolved into an immutable config
//! - [`content_range`] - `Content-Range` header parsing
//! - [`response`] - Response normalization into [`ResourceInfo`]
//! - [`transport`] - The HTTP transport seam and its reqwest implementation
//! - [`error`] - [`RangeRequestError`]

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod content_range;
pub mod error;
pub mod response;
pub mod transport;
mod user_agent;

// Re-export commonly used types
pub use client::{RangeHttpClient, RangeRequestClient};
pub use config::{ClientConfig, ClientOptions, DEFAULT_RESOLVE_URL};
pub use content_range::{ContentRange, parse_content_range};
pub use error::RangeRequestError;
pub use response::{ResourceInfo, ResponseBody};
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
