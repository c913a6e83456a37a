// src/main.rs
mod utils;
mod edgar;
mod extractors;
mod report;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use edgar::client;
use edgar::feed::{self, FeedMode};
use edgar::models::FilingReference;
use report::ReportRow;
use utils::error::EdgarError;
use utils::AppError;

/// Command Line Interface for the SEC Form 4 acquisition tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of feed pages to scan (paged mode)
    #[arg(long, default_value_t = 4)]
    pages: usize,

    /// Filings listed per feed page
    #[arg(long, default_value_t = 100)]
    page_size: usize,

    /// Delay between filing fetches, in milliseconds
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    /// Feed to walk: a paged window of recent filings, or the current feed
    #[arg(long, value_enum, default_value = "paged")]
    feed_mode: FeedMode,

    /// Output CSV path (default: form4_buys_<UTC date>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a header-only CSV when no qualifying transactions are found
    #[arg(long)]
    write_empty: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting Form 4 scan: {:?}", args);

    // 3. One client for the whole run, with the EDGAR User-Agent and timeout
    let http = client::build_edgar_client().map_err(EdgarError::Network)?;

    // 4. List filings from the feed window
    let filings = feed::list_filings(
        &http,
        feed::EDGAR_BASE_URL,
        args.feed_mode,
        args.pages,
        args.page_size,
    )
    .await;
    tracing::info!("Feed listed {} Form 4 filings", filings.len());

    // 5. Fetch and extract each filing sequentially, accumulating rows
    let mut rows = collect_rows(&http, &filings, args.delay_ms).await;

    // 6. Sort by transaction value and write the report
    report::sort_rows(&mut rows);

    if rows.is_empty() && !args.write_empty {
        tracing::info!("No qualifying transactions found; skipping CSV output");
        return Ok(());
    }

    let output = args.output.unwrap_or_else(report::default_output_path);
    report::write_csv(&output, &rows)?;
    tracing::info!("Wrote {} rows to {}", rows.len(), output.display());

    Ok(())
}

/// Fetches and extracts each listed filing in turn, accumulating report
/// rows. Every per-filing failure (fetch or parse) is logged and skipped;
/// the remaining filings are still processed.
async fn collect_rows(
    http: &reqwest::Client,
    filings: &[FilingReference],
    delay_ms: u64,
) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for filing in filings {
        match client::fetch_filing_doc(http, &filing.document_url).await {
            Ok(body) => match extractors::form4::parse_form4(&body) {
                Ok((parsed, transactions)) => {
                    rows.extend(report::build_rows(&parsed, &transactions, filing));
                }
                Err(e) => {
                    tracing::warn!("Unparseable filing {}: {}", filing.document_url, e);
                    skipped += 1;
                }
            },
            Err(e) => {
                tracing::warn!("Skipping filing {}: {}", filing.document_url, e);
                skipped += 1;
            }
        }
        // Fixed inter-request delay; SEC asks for at most 10 requests/second.
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    tracing::info!(
        "Collected {} acquisition rows ({} filings skipped)",
        rows.len(),
        skipped
    );

    rows
}
