use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::StorageError;
use super::traits::{ObjectPage, ObjectStore, StoredObject};

struct Entry {
    data: Vec<u8>,
    last_modified: DateTime<Utc>,
}

/// In-memory object store used by tests.
///
/// Listing pages are keyed by the last key of the previous page, matching
/// the continuation-token contract of the S3 backend.
pub struct InMemoryObjectStore {
    objects: Mutex<BTreeMap<String, Entry>>,
    page_size: usize,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::with_page_size(1000)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            page_size,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).map(|e| e.data.clone())
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }

    /// Rewrite an object's last-modified timestamp. Lets tests age objects
    /// past the sweep grace window.
    pub fn backdate(&self, key: &str, last_modified: DateTime<Utc>) {
        if let Some(entry) = self.objects.lock().unwrap().get_mut(key) {
            entry.last_modified = last_modified;
        }
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            Entry {
                data,
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list_page(&self, continuation: Option<String>) -> Result<ObjectPage, StorageError> {
        let objects = self.objects.lock().unwrap();

        let lower = match continuation {
            Some(token) => Bound::Excluded(token),
            None => Bound::Unbounded,
        };

        let mut page: Vec<StoredObject> = objects
            .range((lower, Bound::Unbounded))
            .take(self.page_size + 1)
            .map(|(key, entry)| StoredObject {
                key: key.clone(),
                last_modified: entry.last_modified,
            })
            .collect();

        let next_token = if page.len() > self.page_size {
            page.truncate(self.page_size);
            page.last().map(|obj| obj.key.clone())
        } else {
            None
        };

        Ok(ObjectPage {
            objects: page,
            next_token,
        })
    }
}
