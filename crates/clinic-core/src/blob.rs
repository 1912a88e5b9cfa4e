//! Blob store trait.

use crate::error::Result;
use async_trait::async_trait;

/// An abstract object store addressed by slash-separated paths.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Deletes the object at `path`.
    ///
    /// Returns `NotFound` when the object does not exist.
    async fn delete_object(&self, path: &str) -> Result<()>;
}

/// Joins a root and an object name into a blob path.
pub fn object_path(root: &str, name: &str) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", root, name)
    }
}
