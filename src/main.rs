//! CLI entry point for the range-probe tool.

use anyhow::Result;
use clap::Parser;
use range_http_client::{ClientOptions, RangeHttpClient, ResourceInfo};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let options = ClientOptions::default().resolve_url(args.resolve_url);
    let client = RangeHttpClient::new(args.url.clone(), Some(options));

    let head = client.get_head_info().await?;
    report("HEAD", &head);

    if let Some(range) = args.range {
        let response = client.get_response(&args.method, range).await?;
        report(&args.method, &response);

        let body = response.bytes().await?;
        info!(
            bytes = body.len(),
            resolved_url = client.resolved_url().as_deref().unwrap_or("-"),
            "range body received"
        );
    }

    Ok(())
}

fn report(label: &str, info: &ResourceInfo) {
    info!(
        request = label,
        status = info.status,
        url = %info.url,
        size = ?info.size,
        mime_type = info.mime_type.as_deref().unwrap_or("-"),
        content_range = ?info.content_range,
        accept_ranges = info.accept_ranges,
        "response"
    );
}
