//! Keeps a digital-signage display in sync with service-provider and
//! property pages scraped from the site's sitemaps.

pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod server;
pub mod store;
pub mod sync;

pub use config::Config;
pub use error::{ScrapeError, StoreError};
