//! Best-effort key/value persistence
//!
//! Thin wrapper over a local fjall keyspace used for the session snapshot,
//! the notification list, and failure counters. Storage is optional by
//! contract: callers go through [`put_value`]/[`get_value`], which log
//! failures and carry on rather than propagating them.

use anyhow::Result;
use async_trait::async_trait;
use fjall::Keyspace;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tokio::task;
use tracing::warn;

/// Well-known storage keys
pub mod keys {
    /// Whether the user has subscribed to weather notifications (bool)
    pub const NOTIFICATIONS_ENABLED: &str = "weatherNotifications";
    /// Persisted notification list (ordered)
    pub const NOTIFICATIONS_LIST: &str = "weatherNotificationsList";
    /// Consecutive provider failure counter
    pub const PROVIDER_FAILURES: &str = "providerFailures";
    /// Unix timestamp of the last provider failure
    pub const LAST_FAILURE_TIME: &str = "lastFailureTime";
    /// Session snapshot of the weather cache (coordinates + label only)
    pub const WEATHER_CACHE: &str = "weatherCache";
}

/// Raw byte-level storage seam. Production uses [`FjallStorage`]; tests use
/// [`MemoryStorage`].
#[async_trait]
pub trait Storage: Send + Sync {
    async fn put_raw(&self, key: &str, bytes: Vec<u8>) -> Result<()>;
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Store a serializable value, swallowing (but logging) any failure
pub async fn put_value<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) {
    let bytes = match postcard::to_stdvec(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to encode value for storage key '{key}': {e}");
            return;
        }
    };
    if let Err(e) = storage.put_raw(key, bytes).await {
        warn!("Storage write for key '{key}' failed: {e}");
    }
}

/// Load a value, treating any failure as "not available"
pub async fn get_value<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let bytes = match storage.get_raw(key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            warn!("Storage read for key '{key}' failed: {e}");
            return None;
        }
    };
    match postcard::from_bytes(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to decode stored value for key '{key}': {e}");
            None
        }
    }
}

/// Persistent storage backed by a local fjall keyspace
pub struct FjallStorage {
    store: Keyspace,
}

impl FjallStorage {
    /// Open (or create) the store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let store = db.keyspace("frostwacht", fjall::KeyspaceCreateOptions::default)?;
        Ok(Self { store })
    }
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

#[async_trait]
impl Storage for FjallStorage {
    async fn put_raw(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let bytes = task::spawn_blocking(move || get_from_store(store, key)).await??;
        Ok(bytes)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }
}

/// In-memory storage for tests and environments without a writable disk
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put_raw(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?
            .insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?
            .get(key)
            .cloned())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        label: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        let snapshot = Snapshot {
            label: "Chemnitz".to_string(),
            count: 3,
        };

        put_value(&storage, keys::WEATHER_CACHE, &snapshot).await;
        let loaded: Option<Snapshot> = get_value(&storage, keys::WEATHER_CACHE).await;
        assert_eq!(loaded, Some(snapshot));
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let storage = MemoryStorage::new();
        let loaded: Option<Snapshot> = get_value(&storage, "nope").await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_value_is_treated_as_missing() {
        let storage = MemoryStorage::new();
        storage
            .put_raw(keys::NOTIFICATIONS_LIST, vec![0xff, 0xff, 0xff])
            .await
            .unwrap();
        let loaded: Option<Snapshot> = get_value(&storage, keys::NOTIFICATIONS_LIST).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let storage = MemoryStorage::new();
        put_value(&storage, keys::PROVIDER_FAILURES, &2u32).await;
        storage.remove(keys::PROVIDER_FAILURES).await.unwrap();
        let loaded: Option<u32> = get_value(&storage, keys::PROVIDER_FAILURES).await;
        assert!(loaded.is_none());
    }
}
