//! HTTP API consumed by the signage display.

pub mod routes;

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ScrapeError;
use crate::models::{Listing, Property};
use crate::scrapers::{ListingScraper, PageScraper, PropertyScraper, ScrapeSettings};
use crate::store::{ListingStore, MemoryStore, RecordStore};
use routes::{health_handler, list_listings, list_properties, refresh_listings, refresh_properties};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub listing_scraper: Arc<dyn PageScraper<Record = Listing>>,
    pub property_scraper: Arc<dyn PageScraper<Record = Property>>,
    pub listings: Arc<dyn ListingStore>,
    pub properties: Arc<dyn RecordStore<Property>>,
    /// Shown when a listing has no contact number of its own
    pub fallback_contact: String,
}

impl AppState {
    /// Live scrapers over fresh in-memory stores
    pub fn with_memory_stores(settings: ScrapeSettings) -> Result<Self, ScrapeError> {
        Ok(Self {
            listing_scraper: Arc::new(ListingScraper::new(settings.clone())?),
            property_scraper: Arc::new(PropertyScraper::new(settings.clone())?),
            listings: Arc::new(MemoryStore::<Listing>::new()),
            properties: Arc::new(MemoryStore::<Property>::new()),
            fallback_contact: settings.fallback_contact,
        })
    }
}

/// Build the API router
pub fn build_app(state: AppState) -> Router {
    // The display may be served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/listings", get(list_listings))
        .route("/api/listings/refresh", post(refresh_listings))
        .route("/api/properties", get(list_properties))
        .route("/api/properties/refresh", post(refresh_properties))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
