use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::StorageError;

/// A single entry in an object listing.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub last_modified: DateTime<Utc>,
}

/// One page of an object listing.
#[derive(Debug)]
pub struct ObjectPage {
    pub objects: Vec<StoredObject>,
    /// Continuation token for the next page, `None` when exhausted.
    pub next_token: Option<String>,
}

/// Keyed object storage for uploaded images.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under a key with the given content type.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Delete an object by key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// List one page of objects, resuming from a continuation token.
    async fn list_page(&self, continuation: Option<String>) -> Result<ObjectPage, StorageError>;
}
