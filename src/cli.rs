//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Probe a remote resource with HEAD and an optional ranged request.
///
/// Prints the normalized size, mime type and Content-Range of each response.
#[derive(Parser, Debug)]
#[command(name = "range-probe")]
#[command(author, version, about)]
pub struct Args {
    /// URL of the remote resource
    pub url: String,

    /// Remember the redirect-resolved URL and use it for the ranged request
    #[arg(long)]
    pub resolve_url: bool,

    /// Inclusive byte range to request, e.g. 0-1023
    #[arg(short, long, value_parser = parse_byte_range)]
    pub range: Option<(u64, u64)>,

    /// HTTP method for the ranged request
    #[arg(short, long, default_value = "GET")]
    pub method: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parses `START-END` into an inclusive byte range.
fn parse_byte_range(value: &str) -> Result<(u64, u64), String> {
    let (start, end) = value
        .split_once('-')
        .ok_or_else(|| format!("expected START-END, got {value:?}"))?;
    let start: u64 = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid range start {start:?}: {e}"))?;
    let end: u64 = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid range end {end:?}: {e}"))?;
    if start > end {
        return Err(format!("range start {start} is after end {end}"));
    }
    Ok((start, end))
}
