//! Default User-Agent sent by [`ReqwestTransport`](crate::ReqwestTransport).

/// Default User-Agent for range requests (identifies the crate and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("range-http-client/{version}")
}
