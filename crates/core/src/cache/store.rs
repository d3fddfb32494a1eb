//! Storage backends for cached responses.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::entry::CacheEntry;
use crate::Error;

/// Key-value store holding one [`CacheEntry`] per request key.
///
/// Implementations decide their own thread-safety; the cache adds no locking
/// on top.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Fetch the entry at `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, Error>;

    /// Write `entry` at `key`, replacing any previous entry.
    async fn set(&self, key: &str, entry: CacheEntry) -> Result<(), Error>;

    /// Remove the entry at `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), Error>;
}

#[async_trait]
impl<S: ResponseStore + ?Sized> ResponseStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, entry: CacheEntry) -> Result<(), Error> {
        (**self).set(key, entry).await
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        (**self).remove(key).await
    }
}

/// In-memory store.
///
/// Uses a HashMap behind a tokio RwLock. Cloning shares the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ResponseStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, entry: CacheEntry) -> Result<(), Error> {
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
