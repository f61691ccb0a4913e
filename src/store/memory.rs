use crate::error::StoreError;
use crate::models::{Listing, SourceKeyed, Stored};
use crate::store::{ListingStore, RecordStore};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process store; records keep their insertion order
pub struct MemoryStore<T> {
    records: RwLock<Vec<Stored<T>>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: SourceKeyed + Clone + Send + Sync + 'static,
{
    async fn list_all(&self) -> Result<Vec<Stored<T>>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Stored<T>>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.record.url() == url).cloned())
    }

    async fn create(&self, record: T) -> Result<Stored<T>, StoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.record.url() == record.url()) {
            return Err(StoreError::DuplicateUrl {
                url: record.url().to_string(),
            });
        }

        let stored = Stored {
            id: Uuid::new_v4(),
            record,
            last_updated: Utc::now(),
        };
        records.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: Uuid, record: T) -> Result<Option<Stored<T>>, StoreError> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|r| r.id != id && r.record.url() == record.url())
        {
            return Err(StoreError::DuplicateUrl {
                url: record.url().to_string(),
            });
        }

        let Some(existing) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        existing.record = record;
        existing.last_updated = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ListingStore for MemoryStore<Listing> {
    async fn list_by_category(&self, category: &str) -> Result<Vec<Stored<Listing>>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.record.category == category)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LISTING_CATEGORY;

    fn listing(url: &str, category: &str) -> Listing {
        Listing {
            url: url.to_string(),
            title: "Prestador Serviços: Pintor".to_string(),
            display_title: "Pintor".to_string(),
            image_url: None,
            contact_number: None,
            tags: None,
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find_by_url() {
        let store: MemoryStore<Listing> = MemoryStore::new();
        let created = store.create(listing("https://x/a", LISTING_CATEGORY)).await.unwrap();

        let found = store.find_by_url("https://x/a").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(store.find_by_url("https://x/b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_url() {
        let store: MemoryStore<Listing> = MemoryStore::new();
        store.create(listing("https://x/a", LISTING_CATEGORY)).await.unwrap();

        let err = store
            .create(listing("https://x/a", LISTING_CATEGORY))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUrl { .. }));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_restamps() {
        let store: MemoryStore<Listing> = MemoryStore::new();
        let created = store.create(listing("https://x/a", LISTING_CATEGORY)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let mut changed = listing("https://x/a", LISTING_CATEGORY);
        changed.display_title = "Pintor Residencial".to_string();
        let updated = store.update(created.id, changed).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.record.display_title, "Pintor Residencial");
        assert!(updated.last_updated > created.last_updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let store: MemoryStore<Listing> = MemoryStore::new();
        let result = store
            .update(Uuid::new_v4(), listing("https://x/a", LISTING_CATEGORY))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let store: MemoryStore<Listing> = MemoryStore::new();
        store.create(listing("https://x/a", LISTING_CATEGORY)).await.unwrap();
        store.create(listing("https://x/b", "Eventos")).await.unwrap();
        store.create(listing("https://x/c", LISTING_CATEGORY)).await.unwrap();

        let urls: Vec<_> = store
            .list_by_category(LISTING_CATEGORY)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.record.url)
            .collect();
        assert_eq!(urls, vec!["https://x/a", "https://x/c"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let store: MemoryStore<Listing> = MemoryStore::new();
        let created = store.create(listing("https://x/a", LISTING_CATEGORY)).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(matches!(
            store.delete(created.id).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
