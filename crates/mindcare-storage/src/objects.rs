//! Thin wrappers over the S3 calls the store needs.

use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

/// A stored object and the ETag it was read at.
pub struct StoredObject {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

/// Condition a PUT must satisfy to be applied.
#[derive(Debug, Clone, Copy)]
pub enum Precondition<'a> {
    /// Unconditional overwrite.
    None,
    /// `If-Match`: the object is still at this ETag.
    Matches(&'a str),
    /// `If-None-Match: *`: nothing is stored at the key yet.
    Absent,
}

/// Fetch `key`, or `None` when no object is stored there.
pub async fn get_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<Option<StoredObject>, StorageError> {
    let resp = match client.get_object().bucket(bucket).key(key).send().await {
        Ok(resp) => resp,
        Err(e) => {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                return Ok(None);
            }
            return Err(StorageError::GetObject(err.to_string()));
        }
    };

    let etag = resp.e_tag().map(str::to_string);
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(Some(StoredObject { body, etag }))
}

/// Store a JSON document at `key` if `precondition` holds.
///
/// A failed precondition is `StorageError::PreconditionFailed`; the caller
/// re-reads and decides whether to retry.
pub async fn put_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    precondition: Precondition<'_>,
) -> Result<(), StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("application/json")
        .body(ByteStream::from(body));
    req = match precondition {
        Precondition::None => req,
        Precondition::Matches(etag) => req.if_match(etag),
        Precondition::Absent => req.if_none_match("*"),
    };

    req.send().await.map_err(|e| {
        let message = e.into_service_error().to_string();
        // 412 when the condition fails, 409 when another conditional
        // write to the same key is in flight.
        if message.contains("PreconditionFailed") || message.contains("ConditionalRequestConflict")
        {
            StorageError::PreconditionFailed {
                key: key.to_string(),
            }
        } else {
            StorageError::PutObject(message)
        }
    })?;

    Ok(())
}

/// Every key under `prefix`, across all result pages.
pub async fn list_objects(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut pages = client
        .list_objects_v2()
        .bucket(bucket)
        .prefix(prefix)
        .into_paginator()
        .send();

    let mut keys = Vec::new();
    while let Some(page) = pages.next().await {
        let page = page.map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;
        keys.extend(page.contents().iter().filter_map(|o| o.key().map(str::to_string)));
    }
    Ok(keys)
}
