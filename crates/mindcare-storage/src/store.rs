use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::s3::S3Store;

/// The persistent store every handler talks to.
///
/// Keys are plain strings laid out by `mindcare_core::keys`. Values are
/// JSON. `get_by_prefix` makes no ordering promise; callers sort.
#[derive(Clone)]
pub enum Store {
    S3(S3Store),
    Memory(MemoryStore),
}

impl Store {
    pub fn memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match self {
            Store::S3(s) => s.get(key).await,
            Store::Memory(m) => m.get(key).await,
        }
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        match self {
            Store::S3(s) => s.set(key, value).await,
            Store::Memory(m) => m.set(key, value).await,
        }
    }

    /// Write `value` only if `key` is unused. Returns whether it was written.
    pub async fn insert(&self, key: &str, value: Vec<u8>) -> Result<bool, StorageError> {
        match self {
            Store::S3(s) => s.insert(key, value).await,
            Store::Memory(m) => m.insert(key, value).await,
        }
    }

    pub async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        match self {
            Store::S3(s) => s.list_keys(prefix).await,
            Store::Memory(m) => m.list_keys(prefix).await,
        }
    }

    pub async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        match self {
            Store::S3(s) => s.get_by_prefix(prefix).await,
            Store::Memory(m) => m.get_by_prefix(prefix).await,
        }
    }

    /// Atomic read-modify-write. `f` receives the current value (if any)
    /// and returns the replacement; it may run more than once.
    pub async fn update<F>(&self, key: &str, f: F) -> Result<Vec<u8>, StorageError>
    where
        F: FnMut(Option<&[u8]>) -> Result<Vec<u8>, StorageError> + Send,
    {
        match self {
            Store::S3(s) => s.update(key, f).await,
            Store::Memory(m) => m.update(key, f).await,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get(key).await? {
            Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
            None => Ok(None),
        }
    }

    /// Like [`Store::get_json`], but a missing key is `StorageError::NotFound`.
    pub async fn require_json<T: DeserializeOwned>(&self, key: &str) -> Result<T, StorageError> {
        self.get_json(key)
            .await?
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let body = serde_json::to_vec(value)?;
        self.set(key, body).await
    }

    pub async fn insert_json<T: Serialize>(&self, key: &str, value: &T) -> Result<bool, StorageError> {
        let body = serde_json::to_vec(value)?;
        self.insert(key, body).await
    }

    pub async fn list_json<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>, StorageError> {
        self.get_by_prefix(prefix)
            .await?
            .iter()
            .map(|body| serde_json::from_slice(body).map_err(StorageError::from))
            .collect()
    }

    /// Atomically apply `f` to the JSON value at `key`, starting from
    /// `init()` when the key is absent. Returns the stored value.
    pub async fn update_json<T, I, F>(&self, key: &str, init: I, f: F) -> Result<T, StorageError>
    where
        T: Serialize + DeserializeOwned,
        I: Fn() -> T + Send + Sync,
        F: Fn(&mut T) + Send + Sync,
    {
        let body = self
            .update(key, |current| {
                let mut value: T = match current {
                    Some(body) => serde_json::from_slice(body)?,
                    None => init(),
                };
                f(&mut value);
                Ok(serde_json::to_vec(&value)?)
            })
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Atomically apply a fallible change to the existing JSON value at `key`.
    ///
    /// A missing key is `StorageError::NotFound`. When `f` fails nothing is
    /// written and its error comes back as the inner `Err`.
    pub async fn modify_json<T, E, F>(&self, key: &str, mut f: F) -> Result<Result<T, E>, StorageError>
    where
        T: Serialize + DeserializeOwned,
        E: Send,
        F: FnMut(&mut T) -> Result<(), E> + Send,
    {
        let mut rejection: Option<E> = None;
        let written = self
            .update(key, |current| {
                let body = current.ok_or_else(|| StorageError::NotFound {
                    key: key.to_string(),
                })?;
                let mut value: T = serde_json::from_slice(body)?;
                match f(&mut value) {
                    Ok(()) => {
                        rejection = None;
                        Ok(serde_json::to_vec(&value)?)
                    }
                    Err(e) => {
                        rejection = Some(e);
                        Err(StorageError::Rejected {
                            key: key.to_string(),
                        })
                    }
                }
            })
            .await;

        match (written, rejection) {
            (Ok(body), _) => Ok(Ok(serde_json::from_slice(&body)?)),
            (Err(StorageError::Rejected { .. }), Some(e)) => Ok(Err(e)),
            (Err(e), _) => Err(e),
        }
    }
}
