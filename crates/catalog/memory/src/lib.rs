//! In-memory [`MetadataCatalog`] backend.
//!
//! One concurrent map keyed by `(category, id)`; `list` filters a full
//! scan by category, matching the scan-only semantics of the real
//! backend. Intended for tests and local development.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use memvault_catalog::{CatalogError, MetadataCatalog};
use memvault_core::{Category, FileRecord};

/// In-memory catalog on a [`DashMap`].
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    records: DashMap<(Category, Uuid), FileRecord>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl MetadataCatalog for MemoryCatalog {
    async fn create(&self, record: &FileRecord) -> Result<(), CatalogError> {
        self.records
            .insert((record.category(), record.id), record.clone());
        Ok(())
    }

    async fn get(&self, category: Category, id: Uuid) -> Result<Option<FileRecord>, CatalogError> {
        Ok(self
            .records
            .get(&(category, id))
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self, category: Category) -> Result<Vec<FileRecord>, CatalogError> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.key().0 == category)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn delete(&self, category: Category, id: Uuid) -> Result<bool, CatalogError> {
        Ok(self.records.remove(&(category, id)).is_some())
    }

    async fn health_check(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use memvault_catalog::testing::run_catalog_conformance_tests;
    use memvault_core::CategoryDetails;

    use super::*;

    #[tokio::test]
    async fn conformance() {
        let catalog = MemoryCatalog::new();
        run_catalog_conformance_tests(&catalog).await.unwrap();
    }

    #[tokio::test]
    async fn len_tracks_creates_and_deletes() {
        let catalog = MemoryCatalog::new();
        assert!(catalog.is_empty());

        let record = FileRecord::new(
            None,
            None,
            "notes/a.txt".to_owned(),
            "memory://memory-vault/notes/a.txt".to_owned(),
            "a.txt".to_owned(),
            "text/plain".to_owned(),
            10,
            CategoryDetails::Notes { tags: vec![] },
        );
        catalog.create(&record).await.unwrap();
        assert_eq!(catalog.len(), 1);

        catalog.delete(Category::Notes, record.id).await.unwrap();
        assert!(catalog.is_empty());
    }
}
