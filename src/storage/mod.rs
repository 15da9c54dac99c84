mod error;
mod traits;

pub mod memory;
pub mod s3;

pub use error::StorageError;
pub use traits::{ObjectPage, ObjectStore, StoredObject};

use crate::utils::object_url::object_key_from_url;

/// Best-effort delete of the object a URL points at.
///
/// Tolerates absent/empty URLs as a no-op. Failures are logged and
/// swallowed: a failed blob delete must never fail or roll back the
/// enclosing content mutation. An orphaned blob is reclaimed later by the
/// reconciliation sweep.
pub async fn delete_by_url(store: &dyn ObjectStore, url: Option<&str>) {
    let Some(url) = url else { return };
    let Some(key) = object_key_from_url(url) else {
        return;
    };

    if let Err(e) = store.delete(&key).await {
        tracing::warn!("Failed to delete object '{}': {}", key, e);
    }
}
