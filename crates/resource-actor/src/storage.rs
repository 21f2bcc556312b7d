//! # Key-Value Storage
//!
//! Actors persist their collection as one JSON array per key. The store itself is a
//! plain string key-value map behind the async [`KeyValueStore`] trait, so the same
//! actor code runs against a directory on disk in production and an in-memory map in
//! tests.
//!
//! - [`MemoryStore`]: `HashMap` behind a mutex, with write-failure injection for tests.
//! - [`FileStore`]: one `<key>.json` file per key inside a data directory.

use crate::error::StorageError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Asynchronous string key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Shared handle to a store, cloned into every actor.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Reads a JSON array stored under `key`. A missing key is an empty collection.
pub async fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    match store.get(key).await? {
        Some(raw) => {
            let items: Vec<T> = serde_json::from_str(&raw)?;
            debug!(key, count = items.len(), "Loaded collection");
            Ok(items)
        }
        None => Ok(Vec::new()),
    }
}

/// Serializes `value` as JSON and stores it under `key`.
pub async fn save_json<V: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &V,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-memory store. Cloning shares the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set` fail with an I/O error (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw value under `key`, bypassing the async API.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            warn!(key, "Injected write failure");
            return Err(StorageError::Io(std::io::Error::other("write rejected")));
        }
        self.lock().insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Directory-backed store: each key lives in its own JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the data directory.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        debug!(dir = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `@pancito_orders` → `<dir>/pancito_orders.json`
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .trim_start_matches('@')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip_and_failure_injection() {
        let store = MemoryStore::new();
        assert_eq!(store.get("@k").await.unwrap(), None);

        store.set("@k", "[1,2]".to_string()).await.unwrap();
        let items: Vec<u32> = load_collection(&store, "@k").await.unwrap();
        assert_eq!(items, vec![1, 2]);

        store.fail_writes(true);
        assert!(store.set("@k", "[]".to_string()).await.is_err());
        assert_eq!(store.raw("@k").as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn test_file_store_maps_keys_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        save_json(&store, "@pancito_orders", &vec!["a", "b"]).await.unwrap();
        assert!(dir.path().join("pancito_orders.json").exists());

        let items: Vec<String> = load_collection(&store, "@pancito_orders").await.unwrap();
        assert_eq!(items, vec!["a".to_string(), "b".to_string()]);

        let missing: Vec<String> = load_collection(&store, "@pancito_dishes").await.unwrap();
        assert!(missing.is_empty());
    }
}
