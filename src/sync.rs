//! Refresh cycle: scrape a sitemap, then upsert every record by source URL.

use crate::error::{ScrapeError, StoreError};
use crate::models::{SourceKeyed, Stored};
use crate::scrapers::PageScraper;
use crate::store::RecordStore;
use tracing::{error, info, warn};

/// Run one full cycle for a pipeline.
///
/// A sitemap failure aborts before anything is written. The result holds
/// only the records touched in this cycle.
pub async fn refresh<T, P, S>(scraper: &P, store: &S) -> Result<Vec<Stored<T>>, ScrapeError>
where
    T: SourceKeyed + Clone + Send + Sync + 'static,
    P: PageScraper<Record = T> + ?Sized,
    S: RecordStore<T> + ?Sized,
{
    info!("Starting {} refresh...", scraper.source_name());

    let records = scraper.scrape_all().await?;
    let touched = reconcile(store, records).await;

    info!(
        "Successfully processed {} {} records",
        touched.len(),
        scraper.source_name()
    );
    Ok(touched)
}

/// Create-or-update each record keyed by URL.
///
/// A store failure drops that record from the result and moves on.
pub async fn reconcile<T, S>(store: &S, records: Vec<T>) -> Vec<Stored<T>>
where
    T: SourceKeyed + Clone + Send + Sync + 'static,
    S: RecordStore<T> + ?Sized,
{
    let mut touched = Vec::with_capacity(records.len());

    for record in records {
        let url = record.url().to_string();
        match upsert(store, record).await {
            Ok(Some(stored)) => touched.push(stored),
            Ok(None) => warn!("Record for {} disappeared before its update", url),
            Err(e) => error!("Error saving record {}: {}", url, e),
        }
    }

    touched
}

async fn upsert<T, S>(store: &S, record: T) -> Result<Option<Stored<T>>, StoreError>
where
    T: SourceKeyed + Clone + Send + Sync + 'static,
    S: RecordStore<T> + ?Sized,
{
    match store.find_by_url(record.url()).await? {
        Some(existing) => store.update(existing.id, record).await,
        None => store.create(record).await.map(Some),
    }
}
