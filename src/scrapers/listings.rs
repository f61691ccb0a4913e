use crate::error::ScrapeError;
use crate::models::{Listing, LISTING_CATEGORY};
use crate::scrapers::contact::find_contact_number;
use crate::scrapers::extract::{
    content_text, extract_title, fallback_image, featured_image, FEATURED_IMAGE_ATTRS,
};
use crate::scrapers::hashtags::extract_hashtags;
use crate::scrapers::http::{build_client, fetch_html};
use crate::scrapers::sitemap::{fetch_sitemap, filter_by_marker};
use crate::scrapers::traits::PageScraper;
use crate::scrapers::types::{BatchSettings, ScrapeSettings};
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

static POST_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.wp-post-image").unwrap());
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static ENTRY_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".entry-content").unwrap());
static POST_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".post-content").unwrap());

/// Label the site puts in front of every service-provider title
static TITLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Prestador\s+Serviços:\s*").unwrap());

/// Scraper for the service-provider posts of the listings sitemap
pub struct ListingScraper {
    client: Client,
    settings: ScrapeSettings,
}

impl ListingScraper {
    pub fn new(settings: ScrapeSettings) -> Result<Self, ScrapeError> {
        let client = build_client(&settings)?;
        Ok(Self { client, settings })
    }

    /// Build a listing from a fetched page
    pub fn parse_listing(&self, url: &str, html: &str) -> Listing {
        let document = Html::parse_document(html);

        let title = extract_title(&document);
        let display_title = strip_title_prefix(&title);

        let image_url = featured_image(
            &document,
            &POST_IMAGE,
            FEATURED_IMAGE_ATTRS,
            &self.settings.site_origin,
        )
        .or_else(|| fallback_image(&document, &self.settings.site_origin));

        let content = content_text(&document, &[&*ARTICLE, &*ENTRY_CONTENT, &*POST_CONTENT]);
        let contact_number = find_contact_number(&content)
            .unwrap_or_else(|| self.settings.fallback_contact.clone());

        let tags = extract_hashtags(&document);

        debug!(
            "Parsed listing '{}' (image: {}, tags: {})",
            display_title,
            image_url.is_some(),
            tags.as_ref().map_or(0, Vec::len)
        );

        Listing {
            url: url.to_string(),
            title,
            display_title,
            image_url,
            contact_number: Some(contact_number),
            tags,
            category: LISTING_CATEGORY.to_string(),
        }
    }

    async fn fetch_listing(&self, url: &str) -> Result<Listing> {
        let html = fetch_html(&self.client, url).await?;
        Ok(self.parse_listing(url, &html))
    }
}

/// Title without the "Prestador Serviços:" label
pub fn strip_title_prefix(title: &str) -> String {
    TITLE_PREFIX.replace(title, "").trim().to_string()
}

#[async_trait]
impl PageScraper for ListingScraper {
    type Record = Listing;

    fn source_name(&self) -> &'static str {
        "listing"
    }

    fn batch_settings(&self) -> BatchSettings {
        self.settings.batch
    }

    async fn discover(&self) -> Result<Vec<String>, ScrapeError> {
        let urls = fetch_sitemap(&self.client, &self.settings.listings_sitemap).await?;
        Ok(filter_by_marker(urls, &self.settings.category_marker))
    }

    async fn scrape_page(&self, url: &str) -> Option<Listing> {
        match self.fetch_listing(url).await {
            Ok(listing) => Some(listing),
            Err(e) => {
                warn!("Error scraping listing {}: {:#}", url, e);
                None
            }
        }
    }
}
