use bytes::Bytes;

use crate::error::BlobError;
use crate::store::BlobStore;

/// Run the full blob store conformance test suite.
///
/// Call this from your backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if any conformance test fails.
pub async fn run_blob_conformance_tests(store: &dyn BlobStore) -> Result<(), BlobError> {
    test_put_and_get(store).await?;
    test_keys_are_unique(store).await?;
    test_get_missing(store).await?;
    test_delete(store).await?;
    test_delete_missing(store).await?;
    test_health_check(store).await?;
    Ok(())
}

async fn test_put_and_get(store: &dyn BlobStore) -> Result<(), BlobError> {
    let data = Bytes::from_static(b"conformance payload");
    let stored = store
        .put(data.clone(), "text/plain", "notes", "conformance.txt")
        .await?;

    assert!(
        stored.key.starts_with("notes/"),
        "key should start with the folder"
    );
    assert!(stored.key.ends_with(".txt"), "key should keep the extension");
    assert!(
        stored.url.ends_with(&stored.key),
        "url should end with the key"
    );

    let fetched = store.get(&stored.key).await?;
    assert_eq!(fetched, data, "get should return the stored bytes");
    Ok(())
}

async fn test_keys_are_unique(store: &dyn BlobStore) -> Result<(), BlobError> {
    let a = store
        .put(Bytes::from_static(b"a"), "text/plain", "notes", "same.txt")
        .await?;
    let b = store
        .put(Bytes::from_static(b"b"), "text/plain", "notes", "same.txt")
        .await?;
    assert_ne!(a.key, b.key, "two puts of the same filename must not collide");
    Ok(())
}

async fn test_get_missing(store: &dyn BlobStore) -> Result<(), BlobError> {
    let result = store.get("notes/00000000-0000-0000-0000-000000000000.txt").await;
    assert!(
        matches!(result, Err(BlobError::NotFound(_))),
        "get on a missing key should return NotFound"
    );
    Ok(())
}

async fn test_delete(store: &dyn BlobStore) -> Result<(), BlobError> {
    let stored = store
        .put(Bytes::from_static(b"bye"), "text/plain", "notes", "bye.txt")
        .await?;
    let existed = store.delete(&stored.key).await?;
    assert!(existed, "delete should return true for an existing key");

    let result = store.get(&stored.key).await;
    assert!(
        matches!(result, Err(BlobError::NotFound(_))),
        "get after delete should return NotFound"
    );
    Ok(())
}

async fn test_delete_missing(store: &dyn BlobStore) -> Result<(), BlobError> {
    let existed = store
        .delete("notes/00000000-0000-0000-0000-000000000000.txt")
        .await?;
    assert!(!existed, "delete on a missing key should return false");
    Ok(())
}

async fn test_health_check(store: &dyn BlobStore) -> Result<(), BlobError> {
    store.health_check().await
}
