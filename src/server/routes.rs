use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::models::{Listing, Property, Stored};
use crate::scrapers::contact::{format_display_phone, whatsapp_link};
use crate::server::AppState;
use crate::store::{ListingStore, RecordStore};
use crate::sync;

/// Response body shared by every list and refresh endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

type Reply<T> = (StatusCode, Json<Envelope<T>>);

fn success<T>(items: Vec<T>) -> Reply<T> {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            items,
            error: None,
        }),
    )
}

fn failure<T>(message: String) -> Reply<T> {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope {
            success: false,
            items: Vec::new(),
            error: Some(message),
        }),
    )
}

/// A stored listing plus the contact rendering the display shows
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Stored<Listing>,
    pub contact_display: String,
    pub contact_link: String,
}

impl ListingView {
    fn new(listing: Stored<Listing>, fallback: &str) -> Self {
        let phone = listing.record.contact_number.as_deref();
        Self {
            contact_display: format_display_phone(phone, fallback),
            contact_link: whatsapp_link(phone, fallback),
            listing,
        }
    }
}

fn listing_views(state: &AppState, listings: Vec<Stored<Listing>>) -> Vec<ListingView> {
    listings
        .into_iter()
        .map(|listing| ListingView::new(listing, &state.fallback_contact))
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
}

/// `GET /api/listings[?category=…]`
pub async fn list_listings(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListingQuery>,
) -> Reply<ListingView> {
    let result = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => state.listings.list_by_category(category).await,
        None => state.listings.list_all().await,
    };

    match result {
        Ok(listings) => success(listing_views(&state, listings)),
        Err(e) => {
            error!("Error fetching listings: {}", e);
            failure("Failed to fetch listings".to_string())
        }
    }
}

/// `POST /api/listings/refresh`: one full listings cycle
pub async fn refresh_listings(Extension(state): Extension<AppState>) -> Reply<ListingView> {
    match sync::refresh(&*state.listing_scraper, &*state.listings).await {
        Ok(listings) => success(listing_views(&state, listings)),
        Err(e) => {
            error!("Error refreshing listings: {}", e);
            failure(format!("Failed to refresh listings: {}", e))
        }
    }
}

/// `GET /api/properties`
pub async fn list_properties(Extension(state): Extension<AppState>) -> Reply<Stored<Property>> {
    match state.properties.list_all().await {
        Ok(properties) => success(properties),
        Err(e) => {
            error!("Error fetching properties: {}", e);
            failure("Failed to fetch properties".to_string())
        }
    }
}

/// `POST /api/properties/refresh`: one full properties cycle
pub async fn refresh_properties(
    Extension(state): Extension<AppState>,
) -> Reply<Stored<Property>> {
    match sync::refresh(&*state.property_scraper, &*state.properties).await {
        Ok(properties) => success(properties),
        Err(e) => {
            error!("Error refreshing properties: {}", e);
            failure(format!("Failed to refresh properties: {}", e))
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::models::{SourceKeyed, TransactionKind, LISTING_CATEGORY};
    use crate::scrapers::{BatchSettings, PageScraper};
    use crate::server::build_app;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use rust_decimal::Decimal;
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Serves fixed records; `None` simulates an unreachable sitemap
    struct Canned<T> {
        records: Option<Vec<T>>,
    }

    #[async_trait]
    impl<T> PageScraper for Canned<T>
    where
        T: SourceKeyed + Clone + Send + Sync + 'static,
    {
        type Record = T;

        fn source_name(&self) -> &'static str {
            "canned"
        }

        fn batch_settings(&self) -> BatchSettings {
            BatchSettings {
                size: 3,
                delay: Duration::ZERO,
            }
        }

        async fn discover(&self) -> Result<Vec<String>, ScrapeError> {
            match &self.records {
                Some(records) => Ok(records.iter().map(|r| r.url().to_string()).collect()),
                None => Err(ScrapeError::SitemapStatus {
                    url: "https://x/post-sitemap.xml".to_string(),
                    status: 502,
                }),
            }
        }

        async fn scrape_page(&self, url: &str) -> Option<T> {
            self.records
                .as_ref()?
                .iter()
                .find(|r| r.url() == url)
                .cloned()
        }
    }

    fn listing(url: &str, category: &str, phone: Option<&str>) -> Listing {
        Listing {
            url: url.to_string(),
            title: "Prestador Serviços: Encanador".to_string(),
            display_title: "Encanador".to_string(),
            image_url: Some("https://x/img.jpg".to_string()),
            contact_number: phone.map(str::to_string),
            tags: Some(vec!["#encanador".to_string()]),
            category: category.to_string(),
        }
    }

    fn property(url: &str) -> Property {
        Property {
            url: url.to_string(),
            title: "Sala comercial".to_string(),
            image_url: None,
            price: Decimal::new(320_000_00, 2),
            transaction_kind: TransactionKind::ForSale,
        }
    }

    fn state(listings: Option<Vec<Listing>>, properties: Option<Vec<Property>>) -> AppState {
        AppState {
            listing_scraper: Arc::new(Canned { records: listings }),
            property_scraper: Arc::new(Canned { records: properties }),
            listings: Arc::new(MemoryStore::<Listing>::new()),
            properties: Arc::new(MemoryStore::<Property>::new()),
            fallback_contact: "(24) 9 8841 8058".to_string(),
        }
    }

    async fn send(state: &AppState, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = build_app(state.clone())
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&state(None, None), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_refresh_listings_then_list() {
        let state = state(
            Some(vec![
                listing("https://x/prestador-servicos/a", LISTING_CATEGORY, Some("(24) 8841-8058")),
                listing("https://x/prestador-servicos/b", LISTING_CATEGORY, None),
            ]),
            None,
        );

        let (status, body) = send(&state, "POST", "/api/listings/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body.get("error").is_none());

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["displayTitle"], "Encanador");
        assert_eq!(items[0]["contactDisplay"], "(24) 9 8841-8058");
        assert_eq!(items[0]["contactLink"], "https://wa.me/+5524988418058");
        assert_eq!(items[1]["contactDisplay"], "(24) 9 8841 8058");
        assert!(items[0]["lastUpdated"].as_str().unwrap().contains('T'));

        let (_, body) = send(&state, "GET", "/api/listings").await;
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_listings_by_category() {
        let state = state(None, None);
        state
            .listings
            .create(listing("https://x/a", LISTING_CATEGORY, None))
            .await
            .unwrap();
        state
            .listings
            .create(listing("https://x/b", "Eventos", None))
            .await
            .unwrap();

        let (_, body) = send(&state, "GET", "/api/listings?category=Eventos").await;
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["url"], "https://x/b");
    }

    #[tokio::test]
    async fn test_refresh_failure_is_structured() {
        let state = state(None, None);

        let (status, body) = send(&state, "POST", "/api/listings/refresh").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["items"], Value::Array(vec![]));
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to refresh listings"));
        assert!(state.listings.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_properties_then_list() {
        let state = state(None, Some(vec![property("https://x/imovel/sala")]));

        let (status, body) = send(&state, "POST", "/api/properties/refresh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["price"], "320000.00");
        assert_eq!(body["items"][0]["transactionKind"], "FOR_SALE");

        let (_, body) = send(&state, "GET", "/api/properties").await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }
}
