//! In-memory blob store.

use async_trait::async_trait;
use clinic_core::blob::BlobStore;
use clinic_core::{ClinicError, Result};
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Blob store that only tracks which object paths exist.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    objects: RwLock<HashSet<String>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, path: impl Into<String>) {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn delete_object(&self, path: &str) -> Result<()> {
        let removed = self
            .objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
        if removed {
            Ok(())
        } else {
            Err(ClinicError::not_found("blob", path))
        }
    }
}
