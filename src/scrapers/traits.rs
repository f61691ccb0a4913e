use crate::error::ScrapeError;
use crate::scrapers::batch::scrape_in_batches;
use crate::scrapers::types::BatchSettings;
use async_trait::async_trait;
use tracing::info;

/// Common trait for the sitemap-driven scrapers
///
/// Implementors supply discovery and single-page extraction; walking the
/// sitemap in polite batches comes for free.
#[async_trait]
pub trait PageScraper: Send + Sync {
    type Record: Send;

    /// Name used in logs
    fn source_name(&self) -> &'static str;

    fn batch_settings(&self) -> BatchSettings;

    /// Candidate page URLs, in sitemap order. Failure aborts the cycle.
    async fn discover(&self) -> Result<Vec<String>, ScrapeError>;

    /// Extract one page. Failures are logged and yield `None`.
    async fn scrape_page(&self, url: &str) -> Option<Self::Record>;

    /// Discover, then scrape every candidate in batches
    async fn scrape_all(&self) -> Result<Vec<Self::Record>, ScrapeError> {
        let urls = self.discover().await?;
        info!("Found {} {} URLs to scrape", urls.len(), self.source_name());

        let records =
            scrape_in_batches(&urls, self.batch_settings(), |url| self.scrape_page(url)).await;

        info!(
            "Scraped {} of {} {} pages",
            records.len(),
            urls.len(),
            self.source_name()
        );
        Ok(records)
    }
}
