use std::time::Duration;
use url::Url;

pub const DEFAULT_SITE_ORIGIN: &str = "https://www.manecogomes.com.br";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; LED-Panel-Bot/1.0)";
pub const DEFAULT_CONTACT_NUMBER: &str = "(24) 9 8841 8058";
pub const DEFAULT_CATEGORY_MARKER: &str = "prestador-servicos";

/// Everything the scrapers need to know about the target site
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Origin used to absolutize root-relative image URLs
    pub site_origin: Url,
    /// Sitemap enumerating service-provider posts
    pub listings_sitemap: String,
    /// Sitemap enumerating property pages
    pub properties_sitemap: String,
    /// Path segment a post URL must contain to be a listing
    pub category_marker: String,
    /// Contact number used when a page shows none
    pub fallback_contact: String,
    pub user_agent: String,
    /// Per-request timeout, applied to sitemaps and pages alike
    pub request_timeout: Duration,
    pub batch: BatchSettings,
}

/// Politeness limits for walking a sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    /// Pages fetched concurrently
    pub size: usize,
    /// Pause between two batches
    pub delay: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            size: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl ScrapeSettings {
    /// Settings for a site hosted at `origin`, with the standard sitemap paths.
    pub fn for_origin(origin: Url) -> Self {
        let listings_sitemap = origin
            .join("/post-sitemap.xml")
            .map(String::from)
            .unwrap_or_else(|_| format!("{}/post-sitemap.xml", DEFAULT_SITE_ORIGIN));
        let properties_sitemap = origin
            .join("/property-sitemap.xml")
            .map(String::from)
            .unwrap_or_else(|_| format!("{}/property-sitemap.xml", DEFAULT_SITE_ORIGIN));

        Self {
            site_origin: origin,
            listings_sitemap,
            properties_sitemap,
            category_marker: DEFAULT_CATEGORY_MARKER.to_string(),
            fallback_contact: DEFAULT_CONTACT_NUMBER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            batch: BatchSettings::default(),
        }
    }
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        let origin = Url::parse(DEFAULT_SITE_ORIGIN).expect("default site origin is a valid URL");
        Self::for_origin(origin)
    }
}
