pub mod base;
pub mod memory_store;

// Re-export the primary store items so code outside can do
// "use crate::store::{SmokerStore, create_store};"
pub use base::{create_store, SmokerStore, StoreError};
pub use memory_store::MemoryStore;
