use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Category-specific payload carried by a [`FileRecord`].
///
/// One polymorphic record with a tagged payload replaces three
/// near-identical record types; everything downstream (marshalling,
/// pipeline, query engine) dispatches on this variant through a single
/// code path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CategoryDetails {
    Notes {
        /// Free-form tags attached at upload time.
        #[serde(default)]
        tags: Vec<String>,
    },
    Images {
        /// Decoded pixel dimensions; 0x0 when the image could not be decoded.
        dimensions: Dimensions,
        /// EXIF key-value pairs, when extracted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exif: Option<BTreeMap<String, String>>,
    },
    Videos {
        /// Duration in seconds. Always 0.0: probing real duration requires a
        /// demuxer, which this pipeline deliberately does not carry.
        duration_seconds: f64,
        /// Display resolution string (e.g. `"1920x1080"`), when known.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolution: Option<String>,
        /// Blob key of a generated thumbnail, when one exists.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail_key: Option<String>,
    },
}

impl CategoryDetails {
    /// The category this payload belongs to.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            CategoryDetails::Notes { .. } => Category::Notes,
            CategoryDetails::Images { .. } => Category::Images,
            CategoryDetails::Videos { .. } => Category::Videos,
        }
    }
}

/// Metadata record describing one stored blob.
///
/// Records are immutable once created: there is no update operation, and
/// `created_at` / `updated_at` are stamped together at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique identifier within the record's category collection.
    pub id: Uuid,

    /// Optional user-supplied title.
    pub title: Option<String>,

    /// Optional user-supplied description.
    pub description: Option<String>,

    /// Blob key; unique across the entire blob namespace and immutable.
    pub storage_key: String,

    /// Direct, unsigned access URL for the blob.
    pub file_url: String,

    /// Sanitized original filename of the upload.
    pub original_filename: String,

    /// MIME type detected from the file contents at ingest time.
    pub file_type: String,

    /// Size of the blob in bytes.
    pub file_size: u64,

    /// Creation timestamp (RFC 3339, lexicographically sortable).
    pub created_at: DateTime<Utc>,

    /// Last-update timestamp. Equals `created_at` for every record today
    /// since records are never updated in place.
    pub updated_at: DateTime<Utc>,

    /// Category tag plus category-specific fields.
    #[serde(flatten)]
    pub details: CategoryDetails,
}

impl FileRecord {
    /// Create a record with a freshly generated id and both timestamps set
    /// to now.
    #[must_use]
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        storage_key: String,
        file_url: String,
        original_filename: String,
        file_type: String,
        file_size: u64,
        details: CategoryDetails,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            storage_key,
            file_url,
            original_filename,
            file_type,
            file_size,
            created_at: now,
            updated_at: now,
            details,
        }
    }

    /// The record's category, derived from its payload variant.
    #[must_use]
    pub fn category(&self) -> Category {
        self.details.category()
    }

    /// Title when present and non-empty, otherwise the original filename.
    ///
    /// This is the display name used for name-keyed sorting.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.original_filename,
        }
    }
}
