use std::time::Duration;

use aws_sdk_s3::Client;
use rand::Rng;
use tracing::debug;

use crate::error::StorageError;
use crate::objects::{self, Precondition};

/// How many times a conditional write is retried before giving up.
pub const MAX_UPDATE_ATTEMPTS: u32 = 5;

const RETRY_BASE_MS: u64 = 20;

/// Wait before retry `attempt` (1-based): exponential from 20ms, plus up to
/// as much again in jitter so racing writers spread out.
pub fn retry_delay(attempt: u32) -> Duration {
    let base = RETRY_BASE_MS << attempt.saturating_sub(1).min(6);
    let jitter = rand::thread_rng().gen_range(0..=base);
    Duration::from_millis(base + jitter)
}

/// S3-backed store. Logical keys are stored under an optional namespace
/// prefix inside the bucket.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
    namespace: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            namespace: namespace.into(),
        }
    }

    fn object_key(&self, key: &str) -> String {
        format!("{}{key}", self.namespace)
    }

    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let object = objects::get_object(&self.client, &self.bucket, &self.object_key(key)).await?;
        Ok(object.map(|o| o.body))
    }

    pub async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        objects::put_object(
            &self.client,
            &self.bucket,
            &self.object_key(key),
            value,
            Precondition::None,
        )
        .await
    }

    pub async fn insert(&self, key: &str, value: Vec<u8>) -> Result<bool, StorageError> {
        let written = objects::put_object(
            &self.client,
            &self.bucket,
            &self.object_key(key),
            value,
            Precondition::Absent,
        )
        .await;
        match written {
            Ok(_) => Ok(true),
            Err(StorageError::PreconditionFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let keys =
            objects::list_objects(&self.client, &self.bucket, &self.object_key(prefix)).await?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.namespace).map(str::to_string))
            .collect())
    }

    pub async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        let mut values = Vec::new();
        for key in self.list_keys(prefix).await? {
            // Deleted between list and get.
            if let Some(value) = self.get(&key).await? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Read-modify-write guarded by conditional puts: `If-None-Match: *`
    /// when the object is new, `If-Match: <etag>` otherwise.
    pub async fn update<F>(&self, key: &str, mut f: F) -> Result<Vec<u8>, StorageError>
    where
        F: FnMut(Option<&[u8]>) -> Result<Vec<u8>, StorageError> + Send,
    {
        let object_key = self.object_key(key);

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let current = objects::get_object(&self.client, &self.bucket, &object_key).await?;
            let next = f(current.as_ref().map(|o| o.body.as_slice()))?;

            let precondition = match current.as_ref().and_then(|o| o.etag.as_deref()) {
                Some(etag) => Precondition::Matches(etag),
                None => Precondition::Absent,
            };
            let written = objects::put_object(
                &self.client,
                &self.bucket,
                &object_key,
                next.clone(),
                precondition,
            )
            .await;

            match written {
                Ok(_) => return Ok(next),
                Err(StorageError::PreconditionFailed { .. }) => {
                    debug!(key, attempt, "conditional write lost a race, retrying");
                    if attempt < MAX_UPDATE_ATTEMPTS {
                        tokio::time::sleep(retry_delay(attempt)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(StorageError::Conflict {
            key: key.to_string(),
            attempts: MAX_UPDATE_ATTEMPTS,
        })
    }
}
