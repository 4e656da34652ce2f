//! `Content-Range` response header parsing.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `bytes <first>-<last>/<length>` where `<length>` may be `*`.
#[allow(clippy::expect_used)]
static CONTENT_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^bytes\s+(\d+)-(\d+)/(\d+|\*)$").expect("Content-Range regex is valid")
});

/// Byte range described by a `Content-Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentRange {
    /// Offset of the first byte in the returned payload.
    pub first_byte: u64,
    /// Offset of the last byte in the returned payload (inclusive).
    pub last_byte: u64,
    /// Total size of the remote resource, `None` when the server sent `*`.
    pub instance_length: Option<u64>,
}

#[allow(clippy::len_without_is_empty)]
impl ContentRange {
    /// Number of bytes covered by the range. Never zero.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.last_byte - self.first_byte + 1
    }
}

/// Parses a raw `Content-Range` header value.
///
/// Returns `None` when the header is absent, uses the unsatisfied (`*/len`)
/// form, or violates `first <= last < length`. An unknown length (`/*`)
/// keeps the byte positions and leaves `instance_length` unset.
///
/// # Examples
///
/// ```
/// use range_http_client::parse_content_range;
///
/// let range = parse_content_range(Some("bytes 0-99/1000")).unwrap();
/// assert_eq!(range.instance_length, Some(1000));
/// assert!(parse_content_range(None).is_none());
/// ```
#[must_use]
pub fn parse_content_range(header: Option<&str>) -> Option<ContentRange> {
    let caps = CONTENT_RANGE_PATTERN.captures(header?.trim())?;
    let first_byte = caps[1].parse::<u64>().ok()?;
    let last_byte = caps[2].parse::<u64>().ok()?;
    let instance_length = match &caps[3] {
        "*" => None,
        length => Some(length.parse::<u64>().ok()?),
    };

    if first_byte > last_byte || instance_length.is_some_and(|length| last_byte >= length) {
        return None;
    }

    Some(ContentRange {
        first_byte,
        last_byte,
        instance_length,
    })
}
