use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three fixed kinds of stored files.
///
/// The category decides which MIME family and extensions an upload may
/// carry, which blob-key folder it lands in, and which catalog collection
/// holds its metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Documents: PDF, plain text, and office formats.
    Notes,
    /// Raster and vector images.
    Images,
    /// Video files.
    Videos,
}

/// Error returned when parsing an unknown category string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported category: {0}")]
pub struct CategoryParseError(pub String);

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 3] = [Category::Notes, Category::Images, Category::Videos];

    /// Return the string representation used in keys, folders, and queries.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Notes => "notes",
            Category::Images => "images",
            Category::Videos => "videos",
        }
    }

    /// Blob-key folder for uploads of this category.
    ///
    /// Keys are laid out as `{folder}/{uuid}{ext}`.
    #[must_use]
    pub fn folder(&self) -> &'static str {
        self.as_str()
    }

    /// Primary-key attribute name in this category's catalog collection.
    ///
    /// The attribute names differ per category; routing them through this
    /// method lets one marshalling path serve all three collections.
    #[must_use]
    pub fn id_attribute(&self) -> &'static str {
        match self {
            Category::Notes => "note_id",
            Category::Images => "image_id",
            Category::Videos => "video_id",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notes" => Ok(Category::Notes),
            "images" => Ok(Category::Images),
            "videos" => Ok(Category::Videos),
            other => Err(CategoryParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn as_str_round_trips() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = Category::from_str("audio").unwrap_err();
        assert_eq!(err.to_string(), "unsupported category: audio");
    }

    #[test]
    fn id_attribute_names() {
        assert_eq!(Category::Notes.id_attribute(), "note_id");
        assert_eq!(Category::Images.id_attribute(), "image_id");
        assert_eq!(Category::Videos.id_attribute(), "video_id");
    }

    #[test]
    fn folder_matches_display() {
        for category in Category::ALL {
            assert_eq!(category.folder(), category.to_string());
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::Notes).unwrap();
        assert_eq!(json, "\"notes\"");
        let parsed: Category = serde_json::from_str("\"videos\"").unwrap();
        assert_eq!(parsed, Category::Videos);
    }
}
