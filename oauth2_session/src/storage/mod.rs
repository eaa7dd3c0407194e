mod errors;
mod memory;
mod types;

use std::sync::Arc;
use tokio::sync::Mutex;

pub use errors::StorageError;
pub use types::{CacheData, CacheStore, InMemoryCacheStore};

/// Store handle shared by every request. The mutex serializes access to the backend.
pub type SharedCacheStore = Arc<Mutex<Box<dyn CacheStore>>>;

/// Create the default in-process store.
pub fn memory_store() -> SharedCacheStore {
    Arc::new(Mutex::new(Box::new(InMemoryCacheStore::new())))
}
