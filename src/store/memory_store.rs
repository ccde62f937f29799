use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::base::{SmokerStore, StoreError};
use crate::models::{Smoker, SmokerUpdate};

/// A `SmokerStore` held in process memory behind a read/write lock.
///
/// Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    smokers: RwLock<HashMap<String, Smoker>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.smokers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.smokers.read().await.is_empty()
    }
}

#[async_trait]
impl SmokerStore for MemoryStore {
    async fn get(&self, id: &str) -> Option<Smoker> {
        self.smokers.read().await.get(id).cloned()
    }

    async fn insert(&self, mut smoker: Smoker) -> Result<Smoker, StoreError> {
        let mut smokers = self.smokers.write().await;
        if smokers.contains_key(&smoker.id) {
            return Err(StoreError::AlreadyExists(smoker.id));
        }
        smoker.created_at = Utc::now();
        debug!(
            event_name = "store.smoker.inserted",
            event_domain = "store",
            id = smoker.id.as_str(),
            "smoker inserted"
        );
        smokers.insert(smoker.id.clone(), smoker.clone());
        Ok(smoker)
    }

    async fn update(&self, id: &str, changes: SmokerUpdate) -> Result<Smoker, StoreError> {
        let mut smokers = self.smokers.write().await;
        let smoker = smokers
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        smoker.apply(changes);
        Ok(smoker.clone())
    }

    async fn delete(&self, id: &str) -> Result<Smoker, StoreError> {
        self.smokers
            .write()
            .await
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Vec<Smoker> {
        let mut all: Vec<Smoker> = self.smokers.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn smoker(id: &str) -> Smoker {
        Smoker {
            id: id.to_string(),
            name: format!("Smoker {}", id),
            password: "pw".to_string(),
            experience: Some(3),
            stopped_smoking: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            created_at: Utc::now() - Duration::days(400),
        }
    }

    fn update(name: &str) -> SmokerUpdate {
        SmokerUpdate {
            name: name.to_string(),
            experience: Some(10),
            stopped_smoking: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            password: None,
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.insert(smoker("1")).await.unwrap();
        let fetched = store.get("1").await.expect("record should exist");
        assert_eq!(fetched.name, "Smoker 1");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_stamps_creation_time() {
        let store = MemoryStore::new();
        let before = Utc::now();
        let inserted = store.insert(smoker("1")).await.unwrap();
        assert!(inserted.created_at >= before);
    }

    #[tokio::test]
    async fn test_insert_conflict() {
        let store = MemoryStore::new();
        store.insert(smoker("1")).await.unwrap();

        let result = store.insert(smoker("1")).await;
        assert_eq!(result.err(), Some(StoreError::AlreadyExists("1".to_string())));
    }

    #[tokio::test]
    async fn test_update_existing_keeps_creation_time() {
        let store = MemoryStore::new();
        let inserted = store.insert(smoker("1")).await.unwrap();

        let updated = store.update("1", update("Renamed")).await.unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.experience, Some(10));
        assert_eq!(updated.created_at, inserted.created_at);
        assert_eq!(store.get("1").await.unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = MemoryStore::new();
        let result = store.update("nope", update("x")).await;
        assert_eq!(result.err(), Some(StoreError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let store = MemoryStore::new();
        store.insert(smoker("1")).await.unwrap();

        assert!(store.delete("1").await.is_ok());
        assert_eq!(
            store.delete("1").await.err(),
            Some(StoreError::NotFound("1".to_string()))
        );
        assert!(store.get("1").await.is_none());
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let store = MemoryStore::new();
        for id in ["c", "a", "b"] {
            store.insert(smoker(id)).await.unwrap();
        }
        let ids: Vec<String> = store.list().await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_same_id_admit_one() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(smoker("same")).await.is_ok() })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }
}
