use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use memvault_blob::{BlobStore, sanitize_filename};
use memvault_catalog::MetadataCatalog;
use memvault_core::{Category, CategoryDetails, Dimensions, FileRecord};

use crate::error::{IngestError, ValidationError};
use crate::request::IngestRequest;

/// Outcome of one phase of a compound delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseResult {
    /// The artifact existed and was removed.
    Deleted,
    /// Nothing existed under the key or id; the phase was a no-op.
    Missing,
    /// The phase was not attempted because an earlier phase failed.
    Skipped,
    /// The backend call failed.
    Failed { reason: String },
}

/// Per-phase outcomes of a compound delete.
///
/// The blob phase and the metadata phase are reported distinctly rather
/// than collapsed into one boolean; there is no transaction spanning the
/// two stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub blob: PhaseResult,
    pub metadata: PhaseResult,
}

impl DeleteReport {
    /// Whether both artifacts are gone (removed now or already absent).
    #[must_use]
    pub fn fully_deleted(&self) -> bool {
        matches!(self.blob, PhaseResult::Deleted | PhaseResult::Missing)
            && matches!(self.metadata, PhaseResult::Deleted | PhaseResult::Missing)
    }
}

/// Orchestrates one upload end to end: sniff, validate, derive metadata,
/// store the blob, persist the record.
///
/// Stateless across invocations; holds only the two backend handles,
/// injected at construction and shared across concurrent operations.
pub struct IngestionPipeline {
    blobs: Arc<dyn BlobStore>,
    catalog: Arc<dyn MetadataCatalog>,
}

impl std::fmt::Debug for IngestionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionPipeline").finish_non_exhaustive()
    }
}

impl IngestionPipeline {
    /// Create a pipeline over the given backends.
    pub fn new(blobs: Arc<dyn BlobStore>, catalog: Arc<dyn MetadataCatalog>) -> Self {
        Self { blobs, catalog }
    }

    /// Ingest one upload.
    ///
    /// The stream is materialized into a temporary spool file that is
    /// removed on every exit path, success or failure. Validation happens
    /// before anything touches a backend: a rejected upload leaves zero
    /// blobs and zero records behind. If the catalog write fails after
    /// the blob upload succeeded, a compensating blob delete restores the
    /// no-artifact state; only when that compensation also fails does the
    /// pipeline report [`IngestError::BlobOrphaned`].
    #[instrument(skip(self, request, source), fields(category = %request.category, filename = %request.original_filename))]
    pub async fn ingest<R>(
        &self,
        request: IngestRequest,
        source: R,
    ) -> Result<FileRecord, IngestError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let category = request.category;
        let filename = sanitize_filename(&request.original_filename);
        if filename.is_empty() {
            return Err(ValidationError::MissingFile.into());
        }
        if !memvault_classify::extension_allowed(&filename, category) {
            let extension = memvault_classify::extension_of(&filename).unwrap_or_default();
            return Err(ValidationError::ExtensionNotAllowed {
                extension,
                category,
            }
            .into());
        }

        // Spool the stream to disk. The NamedTempFile guard deletes the
        // file when it goes out of scope, on every path out of this
        // function.
        let spool = tempfile::NamedTempFile::new()
            .map_err(|e| IngestError::Internal(format!("failed to create spool file: {e}")))?;
        let size = spool_stream(&spool, source).await?;
        if size == 0 {
            return Err(ValidationError::EmptyFile.into());
        }

        let data = tokio::fs::read(spool.path())
            .await
            .map(Bytes::from)
            .map_err(|e| IngestError::Internal(format!("failed to read spool file: {e}")))?;

        // The detected type is authoritative; the client's declaration is
        // only trusted as far as the extension allow-list above.
        let mime = memvault_classify::classify(&data, &filename);
        if !memvault_classify::validate(&mime, category) {
            debug!(mime = %mime, "sniffed content type rejected for category");
            return Err(ValidationError::ContentMismatch {
                detected: mime,
                category,
            }
            .into());
        }

        let details = derive_details(&request, category, spool.path());

        let stored = self
            .blobs
            .put(data, &mime, category.folder(), &filename)
            .await?;

        let record = FileRecord::new(
            request.normalized_title(),
            request.normalized_description(),
            stored.key.clone(),
            stored.url,
            filename,
            mime,
            size,
            details,
        );

        if let Err(catalog_err) = self.catalog.create(&record).await {
            warn!(
                key = %stored.key,
                error = %catalog_err,
                "catalog write failed after blob upload, deleting the blob"
            );
            match self.blobs.delete(&stored.key).await {
                Ok(_) => return Err(IngestError::Catalog(catalog_err)),
                Err(delete_err) => {
                    error!(
                        key = %stored.key,
                        error = %delete_err,
                        "compensating blob delete failed, blob is orphaned"
                    );
                    return Err(IngestError::BlobOrphaned {
                        key: stored.key,
                        source: catalog_err,
                    });
                }
            }
        }

        info!(id = %record.id, key = %record.storage_key, size, "upload ingested");
        Ok(record)
    }

    /// Look up one record.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn record(&self, category: Category, id: Uuid) -> Result<FileRecord, IngestError> {
        self.catalog
            .get(category, id)
            .await?
            .ok_or(IngestError::NotFound { category, id })
    }

    /// Fetch one record together with its blob bytes, for download.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn fetch(
        &self,
        category: Category,
        id: Uuid,
    ) -> Result<(FileRecord, Bytes), IngestError> {
        let record = self.record(category, id).await?;
        let data = self.blobs.get(&record.storage_key).await?;
        Ok((record, data))
    }

    /// Delete one item: blob phase first, then metadata phase.
    ///
    /// The two phases are independent; there is no cross-store
    /// transaction. An unknown id yields a report with both phases
    /// [`PhaseResult::Missing`] rather than an error. When the blob phase
    /// fails the metadata phase is skipped so the record keeps pointing
    /// at the still-present blob and the delete can be retried. A
    /// metadata failure after a successful blob phase is logged for
    /// out-of-band reconciliation.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn delete(&self, category: Category, id: Uuid) -> Result<DeleteReport, IngestError> {
        let Some(record) = self.catalog.get(category, id).await? else {
            debug!(id = %id, "delete of unknown id is a no-op");
            return Ok(DeleteReport {
                blob: PhaseResult::Missing,
                metadata: PhaseResult::Missing,
            });
        };

        let blob = match self.blobs.delete(&record.storage_key).await {
            Ok(true) => PhaseResult::Deleted,
            Ok(false) => PhaseResult::Missing,
            Err(err) => {
                warn!(key = %record.storage_key, error = %err, "blob delete phase failed");
                PhaseResult::Failed {
                    reason: err.to_string(),
                }
            }
        };

        if matches!(blob, PhaseResult::Failed { .. }) {
            return Ok(DeleteReport {
                blob,
                metadata: PhaseResult::Skipped,
            });
        }

        let metadata = match self.catalog.delete(category, id).await {
            Ok(true) => PhaseResult::Deleted,
            Ok(false) => PhaseResult::Missing,
            Err(err) => {
                error!(
                    id = %id,
                    key = %record.storage_key,
                    error = %err,
                    "metadata delete failed after blob phase; record needs out-of-band reconciliation"
                );
                PhaseResult::Failed {
                    reason: err.to_string(),
                }
            }
        };

        info!(id = %id, ?blob, ?metadata, "compound delete finished");
        Ok(DeleteReport { blob, metadata })
    }
}

/// Copy the upload stream into the spool file and return its size.
async fn spool_stream<R>(spool: &tempfile::NamedTempFile, source: R) -> Result<u64, IngestError>
where
    R: AsyncRead + Unpin + Send,
{
    let file = spool
        .reopen()
        .map_err(|e| IngestError::Internal(format!("failed to reopen spool file: {e}")))?;
    let mut file = tokio::fs::File::from_std(file);
    let mut source = source;
    let size = tokio::io::copy(&mut source, &mut file)
        .await
        .map_err(|e| IngestError::Internal(format!("failed to spool upload: {e}")))?;
    file.flush()
        .await
        .map_err(|e| IngestError::Internal(format!("failed to flush spool file: {e}")))?;
    Ok(size)
}

/// Category-specific metadata derived from the spooled upload.
fn derive_details(
    request: &IngestRequest,
    category: Category,
    spool_path: &std::path::Path,
) -> CategoryDetails {
    match category {
        Category::Notes => CategoryDetails::Notes {
            tags: request.tags.clone(),
        },
        Category::Images => {
            let dimensions = match image::image_dimensions(spool_path) {
                Ok((width, height)) => Dimensions { width, height },
                Err(err) => {
                    warn!(error = %err, "could not decode image dimensions");
                    Dimensions::default()
                }
            };
            CategoryDetails::Images {
                dimensions,
                exif: None,
            }
        }
        // Duration stays at zero: probing it would need a demuxer this
        // pipeline does not carry.
        Category::Videos => CategoryDetails::Videos {
            duration_seconds: 0.0,
            resolution: None,
            thumbnail_key: None,
        },
    }
}
