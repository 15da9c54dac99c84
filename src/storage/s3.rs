use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};

use super::error::StorageError;
use super::traits::{ObjectPage, ObjectStore, StoredObject};

/// S3-backed object store.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn list_page(&self, continuation: Option<String>) -> Result<ObjectPage, StorageError> {
        let mut request = self.client.list_objects_v2().bucket(&self.bucket);
        if let Some(token) = continuation {
            request = request.continuation_token(token);
        }

        let output = request
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let objects = output
            .contents()
            .iter()
            .filter_map(|obj| {
                let key = obj.key()?.to_string();
                let ts = obj.last_modified()?;
                let last_modified = DateTime::<Utc>::from_timestamp(ts.secs(), ts.subsec_nanos())?;
                Some(StoredObject { key, last_modified })
            })
            .collect();

        Ok(ObjectPage {
            objects,
            next_token: output.next_continuation_token().map(String::from),
        })
    }
}
