use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StorageError;

/// Process-local store for local runs and tests.
///
/// Every operation takes the same lock, so `update` is atomic with respect
/// to all other writers sharing this store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    pub async fn insert(&self, key: &str, value: Vec<u8>) -> Result<bool, StorageError> {
        let mut entries = self.entries.lock().await;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value);
        Ok(true)
    }

    pub async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    pub async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(_, v)| v.clone())
            .collect())
    }

    pub async fn update<F>(&self, key: &str, mut f: F) -> Result<Vec<u8>, StorageError>
    where
        F: FnMut(Option<&[u8]>) -> Result<Vec<u8>, StorageError> + Send,
    {
        let mut entries = self.entries.lock().await;
        let next = f(entries.get(key).map(|v| v.as_slice()))?;
        entries.insert(key.to_string(), next.clone());
        Ok(next)
    }
}
