// src/edgar/feed.rs
use crate::edgar::client;
use crate::edgar::models::FilingReference;
use crate::utils::error::ExtractError;
use clap::ValueEnum;

pub const EDGAR_BASE_URL: &str = "https://www.sec.gov";

/// Which EDGAR atom feed the lister walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedMode {
    /// Paged window over recent Form 4 filings (start/count pagination).
    Paged,
    /// First N entries of the single always-current filings feed.
    /// Assumes entries link the Form 4 XML document, as the paged feed
    /// does; entries linking an index page pass through unchanged and
    /// fail per-filing at extraction.
    Current,
}

fn paged_feed_url(base: &str, start: usize, count: usize) -> String {
    format!(
        "{base}/cgi-bin/browse-edgar?action=getcompany&SIC=&type=4\
         &owner=include&start={start}&count={count}&output=atom"
    )
}

fn current_feed_url(base: &str, count: usize) -> String {
    format!(
        "{base}/cgi-bin/browse-edgar?action=getcurrent&type=4\
         &company=&dateb=&owner=include&count={count}&output=atom"
    )
}

/// Lists Form 4 filing references across the requested feed window.
///
/// Each page is fetched independently; a page that fails to download or
/// parse is logged and skipped, and the remaining pages are still walked.
pub async fn list_filings(
    client: &reqwest::Client,
    base_url: &str,
    mode: FeedMode,
    pages: usize,
    page_size: usize,
) -> Vec<FilingReference> {
    let mut filings = Vec::new();

    let page_urls: Vec<String> = match mode {
        FeedMode::Paged => (0..pages)
            .map(|i| paged_feed_url(base_url, i * page_size, page_size))
            .collect(),
        FeedMode::Current => vec![current_feed_url(base_url, page_size)],
    };

    let total = page_urls.len();
    for (i, url) in page_urls.iter().enumerate() {
        tracing::info!("Fetching feed page {}/{}", i + 1, total);
        let body = match client::fetch_filing_doc(client, url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Feed page {}/{} unreachable: {}", i + 1, total, e);
                continue;
            }
        };
        match parse_feed_page(&body) {
            Ok(entries) => {
                tracing::debug!("Feed page {}/{} listed {} filings", i + 1, total, entries.len());
                filings.extend(entries);
            }
            Err(e) => tracing::warn!("Feed page {}/{} unparseable: {}", i + 1, total, e),
        }
    }

    filings
}

/// Parses one atom feed page into filing references.
///
/// Every `entry` contributes its first `link@href` as the document URL;
/// entries without a link are skipped. Feed order is preserved as-is.
pub fn parse_feed_page(body: &str) -> Result<Vec<FilingReference>, ExtractError> {
    let doc = roxmltree::Document::parse(body)?;

    let filings = doc
        .descendants()
        .filter(|n| n.has_tag_name("entry"))
        .filter_map(|entry| {
            entry
                .descendants()
                .find(|n| n.has_tag_name("link"))
                .and_then(|link| link.attribute("href"))
        })
        .map(FilingReference::from_document_url)
        .collect();

    Ok(filings)
}
