use thiserror::Error;
use uuid::Uuid;

use memvault_blob::BlobError;
use memvault_catalog::CatalogError;
use memvault_core::Category;

/// Reasons an upload is rejected before anything is persisted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No filename was supplied, or it sanitized down to nothing.
    #[error("no file provided")]
    MissingFile,

    /// The uploaded stream contained zero bytes.
    #[error("uploaded file is empty")]
    EmptyFile,

    /// The filename extension is not allowed for the declared category.
    #[error("extension '{extension}' is not allowed for category {category}")]
    ExtensionNotAllowed {
        extension: String,
        category: Category,
    },

    /// The sniffed content type does not belong to the declared category.
    #[error("content type '{detected}' does not match category {category}")]
    ContentMismatch { detected: String, category: Category },
}

/// Errors surfaced by the ingestion pipeline.
///
/// Every variant is a typed result, not a panic: the presentation layer
/// maps these to user-facing messages.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The upload was rejected during validation; nothing was persisted.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No record exists under the given category and id.
    #[error("item not found: {category}/{id}")]
    NotFound { category: Category, id: Uuid },

    /// The blob backend failed; nothing was persisted.
    #[error("blob storage error: {0}")]
    Storage(#[from] BlobError),

    /// The metadata backend failed. When this follows a successful blob
    /// upload, the compensating blob delete succeeded, so no artifact
    /// remains.
    #[error("metadata catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The metadata write failed after a successful upload AND the
    /// compensating blob delete also failed: the blob under `key` is
    /// stranded and needs out-of-band reconciliation.
    #[error("blob '{key}' orphaned after catalog write failure: {source}")]
    BlobOrphaned {
        key: String,
        #[source]
        source: CatalogError,
    },

    /// An unexpected local failure (spool I/O, etc.).
    #[error("internal error: {0}")]
    Internal(String),
}
