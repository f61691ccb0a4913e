use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category stamped on every record of the listings pipeline
pub const LISTING_CATEGORY: &str = "Profissionais & Empresas";

/// Highest price still treated as a monthly rent
pub const RENT_CEILING: i64 = 90_000;

/// Anything a record store keys by its source page
pub trait SourceKeyed {
    fn url(&self) -> &str;
}

/// Service-provider post scraped from the listings sitemap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub url: String,
    pub title: String,
    pub display_title: String,
    pub image_url: Option<String>,
    pub contact_number: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: String,
}

impl SourceKeyed for Listing {
    fn url(&self) -> &str {
        &self.url
    }
}

/// Whether a property is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    ForSale,
    ForRent,
}

impl TransactionKind {
    /// Rents are the prices in `(0, 90000]`; no price at all counts as a sale.
    pub fn from_price(price: Decimal) -> Self {
        if price > Decimal::ZERO && price <= Decimal::from(RENT_CEILING) {
            TransactionKind::ForRent
        } else {
            TransactionKind::ForSale
        }
    }
}

/// Real-estate property scraped from the properties sitemap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub url: String,
    pub title: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub transaction_kind: TransactionKind,
}

impl SourceKeyed for Property {
    fn url(&self) -> &str {
        &self.url
    }
}

/// A record as persisted: store identity plus the scraped fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: T,
    pub last_updated: DateTime<Utc>,
}
