use async_trait::async_trait;
use uuid::Uuid;

use memvault_core::{Category, FileRecord};

use crate::error::CatalogError;

/// Capability trait for the per-category metadata collections.
///
/// One logical collection per [`Category`], each supporting put-item,
/// get-item-by-id, full scan, and delete-item. There is deliberately no
/// query-by-attribute and no secondary index: search and sort belong to
/// the query engine, not the store. That makes every listing a full scan,
/// which is a documented scalability characteristic of this design.
///
/// Implementations must be safe for concurrent use.
#[async_trait]
pub trait MetadataCatalog: Send + Sync {
    /// Persist a record into its category's collection.
    ///
    /// The record arrives with its id already minted; `create` writes it
    /// as given and never mutates it.
    async fn create(&self, record: &FileRecord) -> Result<(), CatalogError>;

    /// Fetch one record by id. Returns `None` for unknown ids.
    async fn get(&self, category: Category, id: Uuid) -> Result<Option<FileRecord>, CatalogError>;

    /// Scan a category's entire collection. Order is unspecified.
    async fn list(&self, category: Category) -> Result<Vec<FileRecord>, CatalogError>;

    /// Remove one record. Returns `true` iff a record existed.
    async fn delete(&self, category: Category, id: Uuid) -> Result<bool, CatalogError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify object safety.
    fn _assert_dyn_catalog(_: &dyn MetadataCatalog) {}
}
