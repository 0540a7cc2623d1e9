//! In-memory [`BlobStore`] backend.
//!
//! Holds objects in a concurrent map. Intended for tests and local
//! development; URLs use a synthetic `memory://` endpoint so the
//! `{endpoint}/{bucket}/{key}` layout matches the real backends.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use memvault_blob::{BlobError, BlobStore, StoredBlob, object_key};

/// One stored object.
#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
}

/// In-memory blob store on a [`DashMap`].
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    bucket: String,
    objects: DashMap<String, StoredObject>,
}

impl MemoryBlobStore {
    /// Create an empty store with the default bucket name.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bucket("memory-vault")
    }

    /// Create an empty store with a specific bucket name.
    #[must_use]
    pub fn with_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: DashMap::new(),
        }
    }

    /// Number of objects currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Content type recorded for a stored object.
    #[must_use]
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects.get(key).map(|entry| entry.content_type.clone())
    }

    fn url_for(&self, key: &str) -> String {
        format!("memory://{}/{key}", self.bucket)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        data: Bytes,
        content_type: &str,
        folder: &str,
        original_filename: &str,
    ) -> Result<StoredBlob, BlobError> {
        let key = object_key(folder, original_filename);
        let url = self.url_for(&key);
        self.objects.insert(
            key.clone(),
            StoredObject {
                data,
                content_type: content_type.to_owned(),
            },
        );
        Ok(StoredBlob { key, url })
    }

    async fn get(&self, key: &str) -> Result<Bytes, BlobError> {
        self.objects
            .get(key)
            .map(|entry| entry.data.clone())
            .ok_or_else(|| BlobError::NotFound(key.to_owned()))
    }

    async fn delete(&self, key: &str) -> Result<bool, BlobError> {
        Ok(self.objects.remove(key).is_some())
    }

    async fn health_check(&self) -> Result<(), BlobError> {
        Ok(())
    }
}
