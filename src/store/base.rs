use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use super::memory_store::MemoryStore;
use crate::models::{Smoker, SmokerUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("smoker '{0}' already exists")]
    AlreadyExists(String),
    #[error("smoker '{0}' does not exist")]
    NotFound(String),
}

/// The SmokerStore trait abstracts record storage keyed by smoker id (the username).
///
/// Implementations serialise writers; handlers only ever hold owned copies of
/// records, never references into the store.
#[async_trait]
pub trait SmokerStore: Send + Sync {
    async fn get(&self, id: &str) -> Option<Smoker>;
    /// Fails with `AlreadyExists` if the id is taken. Stamps `created_at`.
    async fn insert(&self, smoker: Smoker) -> Result<Smoker, StoreError>;
    async fn update(&self, id: &str, changes: SmokerUpdate) -> Result<Smoker, StoreError>;
    async fn delete(&self, id: &str) -> Result<Smoker, StoreError>;
    /// All records, ordered by id.
    async fn list(&self) -> Vec<Smoker>;
}

/// Creates the in-memory store and loads the seed records into it.
/// Duplicate seeds are skipped with a warning.
pub async fn create_store(seed: &[Smoker]) -> Arc<dyn SmokerStore> {
    let store = MemoryStore::new();
    for smoker in seed {
        if let Err(e) = store.insert(smoker.clone()).await {
            warn!(
                event_name = "store.seed.skipped",
                event_domain = "store",
                error = %e,
                "skipping seed record"
            );
        }
    }
    info!(
        event_name = "store.created",
        event_domain = "store",
        records = store.len().await,
        "in-memory smoker store ready"
    );
    Arc::new(store)
}
