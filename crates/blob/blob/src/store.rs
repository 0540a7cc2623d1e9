use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BlobError;

/// Location of a stored blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Key the object was stored under: `{folder}/{uuid}{ext}`.
    pub key: String,
    /// Direct, unsigned access URL: `{endpoint}/{bucket}/{key}`.
    pub url: String,
}

/// Capability trait for pluggable blob storage backends.
///
/// Implementations must be safe for concurrent use; the pipeline and query
/// engine share one handle across simultaneous operations.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under a freshly generated key inside `folder` and
    /// return the key plus a direct access URL.
    ///
    /// The key embeds a random UUID (see [`crate::key::object_key`]), so
    /// puts never overwrite an existing object.
    async fn put(
        &self,
        data: Bytes,
        content_type: &str,
        folder: &str,
        original_filename: &str,
    ) -> Result<StoredBlob, BlobError>;

    /// Retrieve the bytes stored under `key`.
    ///
    /// Returns [`BlobError::NotFound`] for unknown keys.
    async fn get(&self, key: &str) -> Result<Bytes, BlobError>;

    /// Remove the object under `key`.
    ///
    /// Returns `false`, not an error, when the key does not exist.
    async fn delete(&self, key: &str) -> Result<bool, BlobError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), BlobError>;
}
