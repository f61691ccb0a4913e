//! Persistence seam for scraped records.
//!
//! The pipeline only needs lookup by source URL plus create/update; the
//! [`MemoryStore`] backend keeps everything in process.

pub mod memory;

use crate::error::StoreError;
use crate::models::{Listing, SourceKeyed, Stored};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;

/// Record store for one pipeline. `create` and `update` stamp `last_updated`.
#[async_trait]
pub trait RecordStore<T>: Send + Sync
where
    T: SourceKeyed + Clone + Send + Sync + 'static,
{
    async fn list_all(&self) -> Result<Vec<Stored<T>>, StoreError>;

    async fn find_by_url(&self, url: &str) -> Result<Option<Stored<T>>, StoreError>;

    async fn create(&self, record: T) -> Result<Stored<T>, StoreError>;

    /// Replace every scraped field of `id`; `None` if it no longer exists.
    async fn update(&self, id: Uuid, record: T) -> Result<Option<Stored<T>>, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Listings can additionally be filtered by category
#[async_trait]
pub trait ListingStore: RecordStore<Listing> {
    async fn list_by_category(&self, category: &str) -> Result<Vec<Stored<Listing>>, StoreError>;
}
