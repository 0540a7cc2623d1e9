use uuid::Uuid;

use memvault_core::{Category, CategoryDetails, Dimensions, FileRecord};

use crate::catalog::MetadataCatalog;
use crate::error::CatalogError;

fn test_record(category: Category, title: &str) -> FileRecord {
    let details = match category {
        Category::Notes => CategoryDetails::Notes {
            tags: vec!["conformance".to_owned()],
        },
        Category::Images => CategoryDetails::Images {
            dimensions: Dimensions {
                width: 800,
                height: 600,
            },
            exif: None,
        },
        Category::Videos => CategoryDetails::Videos {
            duration_seconds: 0.0,
            resolution: None,
            thumbnail_key: None,
        },
    };
    FileRecord::new(
        Some(title.to_owned()),
        Some("conformance record".to_owned()),
        format!("{}/{}.bin", category.folder(), Uuid::new_v4()),
        "http://localhost:4566/memory-vault/x".to_owned(),
        "conformance.bin".to_owned(),
        "application/octet-stream".to_owned(),
        42,
        details,
    )
}

/// Run the full metadata catalog conformance test suite.
///
/// Call this from your backend's test module with a fresh catalog
/// instance.
///
/// # Errors
///
/// Returns an error if any conformance test fails.
pub async fn run_catalog_conformance_tests(
    catalog: &dyn MetadataCatalog,
) -> Result<(), CatalogError> {
    test_get_missing(catalog).await?;
    test_create_and_get(catalog).await?;
    test_list_scans_category(catalog).await?;
    test_categories_are_independent(catalog).await?;
    test_delete(catalog).await?;
    test_health_check(catalog).await?;
    Ok(())
}

async fn test_get_missing(catalog: &dyn MetadataCatalog) -> Result<(), CatalogError> {
    let found = catalog.get(Category::Notes, Uuid::new_v4()).await?;
    assert!(found.is_none(), "get on a missing id should return None");
    Ok(())
}

async fn test_create_and_get(catalog: &dyn MetadataCatalog) -> Result<(), CatalogError> {
    for category in Category::ALL {
        let record = test_record(category, "create-and-get");
        catalog.create(&record).await?;

        let found = catalog.get(category, record.id).await?;
        let found = found.expect("created record should be readable");
        assert_eq!(found, record, "round-trip should preserve every field");
    }
    Ok(())
}

async fn test_list_scans_category(catalog: &dyn MetadataCatalog) -> Result<(), CatalogError> {
    let a = test_record(Category::Images, "scan-a");
    let b = test_record(Category::Images, "scan-b");
    catalog.create(&a).await?;
    catalog.create(&b).await?;

    let listed = catalog.list(Category::Images).await?;
    assert!(
        listed.iter().any(|r| r.id == a.id),
        "scan should include every created record"
    );
    assert!(listed.iter().any(|r| r.id == b.id));
    Ok(())
}

async fn test_categories_are_independent(
    catalog: &dyn MetadataCatalog,
) -> Result<(), CatalogError> {
    let note = test_record(Category::Notes, "independent");
    catalog.create(&note).await?;

    let videos = catalog.list(Category::Videos).await?;
    assert!(
        videos.iter().all(|r| r.id != note.id),
        "a record must only appear in its own category's collection"
    );

    let found = catalog.get(Category::Videos, note.id).await?;
    assert!(found.is_none(), "ids are namespaced per category");
    Ok(())
}

async fn test_delete(catalog: &dyn MetadataCatalog) -> Result<(), CatalogError> {
    let record = test_record(Category::Videos, "to-delete");
    catalog.create(&record).await?;

    let existed = catalog.delete(Category::Videos, record.id).await?;
    assert!(existed, "delete should return true for an existing record");

    let found = catalog.get(Category::Videos, record.id).await?;
    assert!(found.is_none(), "get after delete should return None");

    let existed = catalog.delete(Category::Videos, record.id).await?;
    assert!(!existed, "delete on a missing id should return false");
    Ok(())
}

async fn test_health_check(catalog: &dyn MetadataCatalog) -> Result<(), CatalogError> {
    catalog.health_check().await
}
