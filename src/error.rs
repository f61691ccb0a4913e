//! Typed errors for the refresh pipeline.
//!
//! Only failures that abort a whole refresh cycle, and store failures the
//! reconciler has to tell apart, get a type here. Per-page failures stay
//! `anyhow` errors inside the scrapers and never leave them.

use thiserror::Error;
use uuid::Uuid;

/// Errors that abort a refresh cycle before any record is written.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The shared HTTP client could not be built
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Sitemap request failed or timed out
    #[error("failed to fetch sitemap {url}: {source}")]
    SitemapFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Sitemap answered with a non-success status
    #[error("sitemap {url} returned HTTP {status}")]
    SitemapStatus { url: String, status: u16 },

    /// Sitemap body is not well-formed XML
    #[error("malformed sitemap XML: {0}")]
    SitemapParse(String),
}

/// Errors raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this source URL already exists
    #[error("record already exists for url: {url}")]
    DuplicateUrl { url: String },

    /// No record with this id
    #[error("record not found: {0}")]
    NotFound(Uuid),

    /// Backend-specific failure
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
