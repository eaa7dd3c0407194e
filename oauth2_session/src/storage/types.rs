use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::StorageError;

/// Data stored in the cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheData {
    pub value: String,
}

pub(super) struct MemoryEntry {
    pub(super) data: CacheData,
    pub(super) expires_at: DateTime<Utc>,
}

/// Process-local store. Entries vanish on restart and are not shared between instances.
pub struct InMemoryCacheStore {
    pub(super) entry: HashMap<String, MemoryEntry>,
}

/// Key-value backend for session records.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StorageError>;

    /// Put a value into the store, expiring after `ttl` seconds.
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError>;

    /// Get a value from the store. Expired values are reported as absent.
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError>;

    /// Remove a value from the store. Removing a missing key is not an error.
    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError>;
}
