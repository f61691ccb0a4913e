use crate::scrapers::types::{ScrapeSettings, DEFAULT_SITE_ORIGIN};
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use url::Url;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scrape: ScrapeSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let origin = env::var("SITE_ORIGIN").unwrap_or_else(|_| DEFAULT_SITE_ORIGIN.to_string());
        let origin = Url::parse(&origin).context("SITE_ORIGIN must be a valid URL")?;
        let mut scrape = ScrapeSettings::for_origin(origin);

        if let Ok(url) = env::var("LISTINGS_SITEMAP_URL") {
            scrape.listings_sitemap = url;
        }
        if let Ok(url) = env::var("PROPERTIES_SITEMAP_URL") {
            scrape.properties_sitemap = url;
        }
        if let Ok(marker) = env::var("LISTING_CATEGORY_MARKER") {
            scrape.category_marker = marker;
        }
        if let Ok(number) = env::var("FALLBACK_CONTACT_NUMBER") {
            scrape.fallback_contact = number;
        }
        if let Ok(agent) = env::var("SCRAPER_USER_AGENT") {
            scrape.user_agent = agent;
        }
        if let Ok(secs) = env::var("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
            scrape.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(size) = env::var("BATCH_SIZE") {
            scrape.batch.size = size.parse().context("BATCH_SIZE must be a valid number")?;
            anyhow::ensure!(scrape.batch.size > 0, "BATCH_SIZE must be at least 1");
        }
        if let Ok(ms) = env::var("BATCH_DELAY_MS") {
            let ms: u64 = ms.parse().context("BATCH_DELAY_MS must be a valid number")?;
            scrape.batch.delay = Duration::from_millis(ms);
        }

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            scrape,
        })
    }
}
