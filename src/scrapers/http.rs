use crate::error::ScrapeError;
use crate::scrapers::types::ScrapeSettings;
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

/// Build the client shared by sitemap and page fetches.
///
/// Timeout and user agent are set once here so every request of a cycle
/// carries the same policy.
pub fn build_client(settings: &ScrapeSettings) -> Result<Client, ScrapeError> {
    Client::builder()
        .timeout(settings.request_timeout)
        .user_agent(settings.user_agent.as_str())
        .build()
        .map_err(ScrapeError::Client)
}

/// Fetch a page body, treating any non-success status as a failure
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    debug!("Fetching URL: {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("HTTP {} for {}", status, url);
    }

    let html = response.text().await.context("Failed to read response body")?;
    debug!("Downloaded {} bytes of HTML from {}", html.len(), url);

    Ok(html)
}
