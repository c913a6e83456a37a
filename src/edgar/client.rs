// src/edgar/client.rs
use crate::utils::error::EdgarError;
use reqwest::header;
use std::time::Duration;

// IMPORTANT: Replace with your actual details or make configurable.
// SEC blocks default client User-Agents; they ask for a tool name and contact.
const EDGAR_USER_AGENT: &str = "Form4Tracker/0.1 (contact: form4tracker@example.com)";
const EDGAR_TIMEOUT_SECS: u64 = 30;

/// Creates a reqwest client configured for EDGAR interaction.
pub fn build_edgar_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(EDGAR_USER_AGENT) // Set the required User-Agent
        .timeout(Duration::from_secs(EDGAR_TIMEOUT_SECS))
        .build()
}

/// Downloads a single filing document body from its URL.
///
/// Any non-2xx status or transport failure is returned as an error the
/// caller treats as a per-filing skip, never a run abort.
pub async fn fetch_filing_doc(client: &reqwest::Client, url: &str) -> Result<String, EdgarError> {
    tracing::debug!("Downloading document from: {}", url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/xml,text/html,text/plain,*/*")
        .send()
        .await?; // Propagates reqwest::Error as EdgarError::Network

    let status = response.status();
    if !status.is_success() {
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
            return Err(EdgarError::RateLimited);
        }
        tracing::debug!("HTTP error status: {} for URL: {}", status, url);
        return Err(EdgarError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/Archives/form4.xml");
                then.status(200).body("<ownershipDocument/>");
            })
            .await;

        let client = build_edgar_client().unwrap();
        let body = fetch_filing_doc(&client, &server.url("/Archives/form4.xml"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, "<ownershipDocument/>");
    }

    #[tokio::test]
    async fn test_fetch_reports_http_error_on_404() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/Archives/missing.xml");
                then.status(404);
            })
            .await;

        let client = build_edgar_client().unwrap();
        let result = fetch_filing_doc(&client, &server.url("/Archives/missing.xml")).await;

        match result {
            Err(EdgarError::Http(status)) => assert_eq!(status, reqwest::StatusCode::NOT_FOUND),
            other => panic!("expected Http(404), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_maps_403_to_rate_limited() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/Archives/blocked.xml");
                then.status(403);
            })
            .await;

        let client = build_edgar_client().unwrap();
        let result = fetch_filing_doc(&client, &server.url("/Archives/blocked.xml")).await;

        assert!(matches!(result, Err(EdgarError::RateLimited)));
    }
}
