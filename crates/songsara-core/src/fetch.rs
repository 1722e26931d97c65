//! HTTP client construction and album page retrieval.
//!
//! Page requests carry a browser-like header set; SongSara serves a stripped
//! or blocked page to clients that look like bots. Track downloads reuse the
//! same client without the extra headers.

use anyhow::{Context, Result};
use reqwest::header;
use std::time::Duration;

use crate::error::{status_parts, FetchError};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Builds the shared HTTP client with the given request timeout.
///
/// The timeout covers the whole request, body included, for page and track
/// requests alike.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("build HTTP client")
}

/// Fetches an album page and returns its HTML.
///
/// Non-2xx statuses become [`FetchError::Status`]; connection and decode
/// problems become [`FetchError::Transport`].
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let resp = client
        .get(url)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .header(header::ACCEPT, BROWSER_ACCEPT)
        .header(header::ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
        .header(header::CONNECTION, "keep-alive")
        .header("Upgrade-Insecure-Requests", "1")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let (status, message) = status_parts(status);
        return Err(FetchError::Status { status, message });
    }

    Ok(resp.text().await?)
}
