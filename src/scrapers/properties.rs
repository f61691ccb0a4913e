use crate::error::ScrapeError;
use crate::models::{Property, TransactionKind};
use crate::scrapers::extract::{
    extract_title, fallback_image, featured_image, page_text, FEATURED_IMAGE_ATTRS,
};
use crate::scrapers::http::{build_client, fetch_html};
use crate::scrapers::price::extract_price;
use crate::scrapers::sitemap::fetch_sitemap;
use crate::scrapers::traits::PageScraper;
use crate::scrapers::types::{BatchSettings, ScrapeSettings};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

static PROPERTY_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.property-featured-image").unwrap());
static POST_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.wp-post-image").unwrap());

/// Scraper for the real-estate pages of the properties sitemap
pub struct PropertyScraper {
    client: Client,
    settings: ScrapeSettings,
}

impl PropertyScraper {
    pub fn new(settings: ScrapeSettings) -> Result<Self, ScrapeError> {
        let client = build_client(&settings)?;
        Ok(Self { client, settings })
    }

    /// Build a property from a fetched page
    pub fn parse_property(&self, url: &str, html: &str) -> Property {
        let document = Html::parse_document(html);
        let origin = &self.settings.site_origin;

        let title = extract_title(&document);

        let image_url = featured_image(&document, &PROPERTY_IMAGE, FEATURED_IMAGE_ATTRS, origin)
            .or_else(|| featured_image(&document, &POST_IMAGE, FEATURED_IMAGE_ATTRS, origin))
            .or_else(|| fallback_image(&document, origin));

        let price = extract_price(&page_text(&document));
        let transaction_kind = TransactionKind::from_price(price);

        debug!(
            "Parsed property '{}' (price: {}, {:?})",
            title, price, transaction_kind
        );

        Property {
            url: url.to_string(),
            title,
            image_url,
            price,
            transaction_kind,
        }
    }

    async fn fetch_property(&self, url: &str) -> Result<Property> {
        let html = fetch_html(&self.client, url).await?;
        Ok(self.parse_property(url, &html))
    }
}

#[async_trait]
impl PageScraper for PropertyScraper {
    type Record = Property;

    fn source_name(&self) -> &'static str {
        "property"
    }

    fn batch_settings(&self) -> BatchSettings {
        self.settings.batch
    }

    async fn discover(&self) -> Result<Vec<String>, ScrapeError> {
        fetch_sitemap(&self.client, &self.settings.properties_sitemap).await
    }

    async fn scrape_page(&self, url: &str) -> Option<Property> {
        match self.fetch_property(url).await {
            Ok(property) => Some(property),
            Err(e) => {
                warn!("Error scraping property {}: {:#}", url, e);
                None
            }
        }
    }
}
