//! Marshalling between [`FileRecord`] and DynamoDB items.
//!
//! One code path serves all three tables; the per-category primary-key
//! attribute name comes from [`Category::id_attribute`]. DynamoDB `N`
//! values are arbitrary-precision decimal strings on the wire; they are
//! normalized to fixed-width numerics here, at the adapter boundary, so
//! nothing backend-specific reaches the pipeline or query engine.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use memvault_catalog::CatalogError;
use memvault_core::{Category, CategoryDetails, Dimensions, FileRecord};

type Item = HashMap<String, AttributeValue>;

/// Marshal a record into a DynamoDB item for its category's table.
#[must_use]
pub fn to_item(record: &FileRecord) -> Item {
    let mut item = Item::new();
    let category = record.category();

    item.insert(
        category.id_attribute().to_owned(),
        AttributeValue::S(record.id.to_string()),
    );
    // Optional text fields are stored as empty strings rather than
    // omitted attributes.
    item.insert(
        "title".to_owned(),
        AttributeValue::S(record.title.clone().unwrap_or_default()),
    );
    item.insert(
        "description".to_owned(),
        AttributeValue::S(record.description.clone().unwrap_or_default()),
    );
    item.insert(
        "s3_key".to_owned(),
        AttributeValue::S(record.storage_key.clone()),
    );
    item.insert(
        "file_url".to_owned(),
        AttributeValue::S(record.file_url.clone()),
    );
    item.insert(
        "original_filename".to_owned(),
        AttributeValue::S(record.original_filename.clone()),
    );
    item.insert(
        "file_type".to_owned(),
        AttributeValue::S(record.file_type.clone()),
    );
    item.insert(
        "file_size".to_owned(),
        AttributeValue::N(record.file_size.to_string()),
    );
    item.insert(
        "created_at".to_owned(),
        AttributeValue::S(record.created_at.to_rfc3339()),
    );
    item.insert(
        "updated_at".to_owned(),
        AttributeValue::S(record.updated_at.to_rfc3339()),
    );

    match &record.details {
        CategoryDetails::Notes { tags } => {
            item.insert(
                "tags".to_owned(),
                AttributeValue::L(tags.iter().cloned().map(AttributeValue::S).collect()),
            );
        }
        CategoryDetails::Images { dimensions, exif } => {
            let mut dims = Item::new();
            dims.insert(
                "width".to_owned(),
                AttributeValue::N(dimensions.width.to_string()),
            );
            dims.insert(
                "height".to_owned(),
                AttributeValue::N(dimensions.height.to_string()),
            );
            item.insert("dimensions".to_owned(), AttributeValue::M(dims));
            if let Some(exif) = exif {
                let map = exif
                    .iter()
                    .map(|(k, v)| (k.clone(), AttributeValue::S(v.clone())))
                    .collect();
                item.insert("exif_data".to_owned(), AttributeValue::M(map));
            }
        }
        CategoryDetails::Videos {
            duration_seconds,
            resolution,
            thumbnail_key,
        } => {
            item.insert(
                "duration".to_owned(),
                AttributeValue::N(duration_seconds.to_string()),
            );
            if let Some(resolution) = resolution {
                item.insert(
                    "resolution".to_owned(),
                    AttributeValue::S(resolution.clone()),
                );
            }
            if let Some(thumbnail_key) = thumbnail_key {
                item.insert(
                    "thumbnail_key".to_owned(),
                    AttributeValue::S(thumbnail_key.clone()),
                );
            }
        }
    }

    item
}

/// Unmarshal a DynamoDB item into a record of the given category.
pub fn from_item(category: Category, item: &Item) -> Result<FileRecord, CatalogError> {
    let id = req_s(item, category.id_attribute())?;
    let id = Uuid::parse_str(&id)
        .map_err(|e| CatalogError::Serialization(format!("invalid record id '{id}': {e}")))?;

    let details = match category {
        Category::Notes => CategoryDetails::Notes {
            tags: string_list(item, "tags"),
        },
        Category::Images => CategoryDetails::Images {
            dimensions: dimensions(item)?,
            exif: string_map(item, "exif_data"),
        },
        Category::Videos => CategoryDetails::Videos {
            duration_seconds: number_f64(item, "duration")?,
            resolution: opt_text(item, "resolution"),
            thumbnail_key: opt_text(item, "thumbnail_key"),
        },
    };

    Ok(FileRecord {
        id,
        title: opt_text(item, "title"),
        description: opt_text(item, "description"),
        storage_key: req_s(item, "s3_key")?,
        file_url: req_s(item, "file_url")?,
        original_filename: req_s(item, "original_filename")?,
        file_type: req_s(item, "file_type")?,
        file_size: number_u64(item, "file_size")?,
        created_at: timestamp(item, "created_at")?,
        updated_at: timestamp(item, "updated_at")?,
        details,
    })
}

fn req_s(item: &Item, name: &str) -> Result<String, CatalogError> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Ok(s.clone()),
        Some(_) => Err(CatalogError::Serialization(format!(
            "attribute '{name}' is not a string"
        ))),
        None => Err(CatalogError::Serialization(format!(
            "missing attribute '{name}'"
        ))),
    }
}

/// Optional text attribute; absent or empty means `None`.
fn opt_text(item: &Item, name: &str) -> Option<String> {
    match item.get(name) {
        Some(AttributeValue::S(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Normalize a decimal-string `N` attribute to `u64`. A missing
/// attribute reads as 0.
fn number_u64(item: &Item, name: &str) -> Result<u64, CatalogError> {
    match item.get(name) {
        Some(AttributeValue::N(n)) => n.parse::<u64>().map_err(|e| {
            CatalogError::Serialization(format!("attribute '{name}' = '{n}' is not a u64: {e}"))
        }),
        Some(_) => Err(CatalogError::Serialization(format!(
            "attribute '{name}' is not a number"
        ))),
        None => Ok(0),
    }
}

/// Normalize a decimal-string `N` attribute to `f64`.
fn number_f64(item: &Item, name: &str) -> Result<f64, CatalogError> {
    match item.get(name) {
        Some(AttributeValue::N(n)) => n.parse::<f64>().map_err(|e| {
            CatalogError::Serialization(format!("attribute '{name}' = '{n}' is not an f64: {e}"))
        }),
        Some(_) => Err(CatalogError::Serialization(format!(
            "attribute '{name}' is not a number"
        ))),
        None => Ok(0.0),
    }
}

fn number_u32(value: &AttributeValue, name: &str) -> Result<u32, CatalogError> {
    match value {
        AttributeValue::N(n) => n.parse::<u32>().map_err(|e| {
            CatalogError::Serialization(format!("attribute '{name}' = '{n}' is not a u32: {e}"))
        }),
        _ => Err(CatalogError::Serialization(format!(
            "attribute '{name}' is not a number"
        ))),
    }
}

fn timestamp(item: &Item, name: &str) -> Result<DateTime<Utc>, CatalogError> {
    let raw = req_s(item, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            CatalogError::Serialization(format!("attribute '{name}' = '{raw}' is not RFC 3339: {e}"))
        })
}

fn string_list(item: &Item, name: &str) -> Vec<String> {
    match item.get(name) {
        Some(AttributeValue::L(values)) => values
            .iter()
            .filter_map(|v| v.as_s().ok().cloned())
            .collect(),
        _ => Vec::new(),
    }
}

fn string_map(item: &Item, name: &str) -> Option<BTreeMap<String, String>> {
    match item.get(name) {
        Some(AttributeValue::M(map)) => Some(
            map.iter()
                .filter_map(|(k, v)| v.as_s().ok().map(|s| (k.clone(), s.clone())))
                .collect(),
        ),
        _ => None,
    }
}

fn dimensions(item: &Item) -> Result<Dimensions, CatalogError> {
    match item.get("dimensions") {
        Some(AttributeValue::M(map)) => {
            let width = map
                .get("width")
                .map(|v| number_u32(v, "dimensions.width"))
                .transpose()?
                .unwrap_or(0);
            let height = map
                .get("height")
                .map(|v| number_u32(v, "dimensions.height"))
                .transpose()?
                .unwrap_or(0);
            Ok(Dimensions { width, height })
        }
        _ => Ok(Dimensions::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(details: CategoryDetails) -> FileRecord {
        FileRecord::new(
            Some("Trip".to_owned()),
            None,
            "images/abc.png".to_owned(),
            "http://localhost:4566/memory-vault/images/abc.png".to_owned(),
            "trip.png".to_owned(),
            "image/png".to_owned(),
            1536,
            details,
        )
    }

    #[test]
    fn notes_round_trip() {
        let record = FileRecord {
            details: CategoryDetails::Notes {
                tags: vec!["work".to_owned(), "q3".to_owned()],
            },
            ..sample(CategoryDetails::Notes { tags: vec![] })
        };
        let item = to_item(&record);
        assert!(item.contains_key("note_id"));
        assert!(!item.contains_key("image_id"));

        let back = from_item(Category::Notes, &item).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn images_round_trip_with_exif() {
        let mut exif = BTreeMap::new();
        exif.insert("Make".to_owned(), "TestCam".to_owned());
        let record = sample(CategoryDetails::Images {
            dimensions: Dimensions {
                width: 1920,
                height: 1080,
            },
            exif: Some(exif),
        });
        let item = to_item(&record);
        let back = from_item(Category::Images, &item).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn videos_round_trip() {
        let record = sample(CategoryDetails::Videos {
            duration_seconds: 0.0,
            resolution: Some("1920x1080".to_owned()),
            thumbnail_key: None,
        });
        let item = to_item(&record);
        let back = from_item(Category::Videos, &item).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn empty_optional_text_reads_as_none() {
        let record = FileRecord {
            title: None,
            description: None,
            ..sample(CategoryDetails::Notes { tags: vec![] })
        };
        let item = to_item(&record);
        // None is written as an empty string, not an omitted attribute.
        assert_eq!(item["title"], AttributeValue::S(String::new()));

        let back = from_item(Category::Notes, &item).unwrap();
        assert_eq!(back.title, None);
        assert_eq!(back.description, None);
    }

    #[test]
    fn decimal_string_sizes_are_normalized() {
        let record = sample(CategoryDetails::Notes { tags: vec![] });
        let mut item = to_item(&record);
        item.insert("file_size".to_owned(), AttributeValue::N("1536".to_owned()));

        let back = from_item(Category::Notes, &item).unwrap();
        assert_eq!(back.file_size, 1536_u64);
    }

    #[test]
    fn missing_file_size_defaults_to_zero() {
        let record = sample(CategoryDetails::Notes { tags: vec![] });
        let mut item = to_item(&record);
        item.remove("file_size");

        let back = from_item(Category::Notes, &item).unwrap();
        assert_eq!(back.file_size, 0);
    }

    #[test]
    fn unparseable_number_is_a_serialization_error() {
        let record = sample(CategoryDetails::Notes { tags: vec![] });
        let mut item = to_item(&record);
        item.insert(
            "file_size".to_owned(),
            AttributeValue::N("not-a-number".to_owned()),
        );

        let err = from_item(Category::Notes, &item).unwrap_err();
        assert!(matches!(err, CatalogError::Serialization(_)));
    }

    #[test]
    fn missing_required_attribute_is_an_error() {
        let record = sample(CategoryDetails::Notes { tags: vec![] });
        let mut item = to_item(&record);
        item.remove("s3_key");

        let err = from_item(Category::Notes, &item).unwrap_err();
        assert!(err.to_string().contains("s3_key"));
    }

    #[test]
    fn missing_dimensions_default_to_zero() {
        let record = sample(CategoryDetails::Images {
            dimensions: Dimensions {
                width: 10,
                height: 20,
            },
            exif: None,
        });
        let mut item = to_item(&record);
        item.remove("dimensions");

        let back = from_item(Category::Images, &item).unwrap();
        match back.details {
            CategoryDetails::Images { dimensions, .. } => {
                assert_eq!(dimensions, Dimensions::default());
            }
            _ => panic!("expected images payload"),
        }
    }

    #[test]
    fn timestamps_survive_the_round_trip() {
        let record = sample(CategoryDetails::Notes { tags: vec![] });
        let item = to_item(&record);
        let back = from_item(Category::Notes, &item).unwrap();
        assert_eq!(back.created_at, record.created_at);
        assert_eq!(back.updated_at, record.updated_at);
    }
}
