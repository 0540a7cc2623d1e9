use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use memvault_catalog::{CatalogError, MetadataCatalog};
use memvault_core::{Category, FileRecord};

use crate::sort::by_date_desc;
use crate::stats::{StorageStats, aggregate};

/// Errors surfaced by the query engine.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The metadata backend failed.
    #[error("metadata catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Per-category record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub notes: usize,
    pub images: usize,
    pub videos: usize,
}

impl CategoryCounts {
    /// Total count across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.notes + self.images + self.videos
    }
}

/// Cross-category search hits, grouped by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub notes: Vec<FileRecord>,
    pub images: Vec<FileRecord>,
    pub videos: Vec<FileRecord>,
}

impl SearchResults {
    /// Total number of hits.
    #[must_use]
    pub fn total(&self) -> usize {
        self.notes.len() + self.images.len() + self.videos.len()
    }
}

/// Read-side engine over the three catalogs.
///
/// Every operation works on a best-effort snapshot produced by full
/// catalog scans; the store keeps no secondary index, so filtering and
/// ordering happen here. Stateless across invocations.
pub struct CatalogQueryEngine {
    catalog: Arc<dyn MetadataCatalog>,
}

impl std::fmt::Debug for CatalogQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogQueryEngine").finish_non_exhaustive()
    }
}

impl CatalogQueryEngine {
    /// Create an engine over the given catalog.
    pub fn new(catalog: Arc<dyn MetadataCatalog>) -> Self {
        Self { catalog }
    }

    /// List a category, optionally filtered by a search term.
    ///
    /// An empty or absent term returns the full scan. Otherwise a record
    /// matches when its title or description contains the term as a
    /// case-insensitive substring; absent fields are treated as empty.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn list(
        &self,
        category: Category,
        search_term: Option<&str>,
    ) -> Result<Vec<FileRecord>, QueryError> {
        let records = self.catalog.list(category).await?;

        let term = search_term.unwrap_or_default();
        if term.is_empty() {
            return Ok(records);
        }

        let needle = term.to_lowercase();
        let hits: Vec<_> = records
            .into_iter()
            .filter(|record| matches_term(record, &needle))
            .collect();
        debug!(term = %term, hits = hits.len(), "search filtered the scan");
        Ok(hits)
    }

    /// Per-category record counts, for tab headers.
    pub async fn counts(&self) -> Result<CategoryCounts, QueryError> {
        Ok(CategoryCounts {
            notes: self.catalog.list(Category::Notes).await?.len(),
            images: self.catalog.list(Category::Images).await?.len(),
            videos: self.catalog.list(Category::Videos).await?.len(),
        })
    }

    /// Aggregate count/byte statistics across all categories.
    #[instrument(skip(self))]
    pub async fn aggregate_stats(&self) -> Result<StorageStats, QueryError> {
        let mut listings = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            listings.push((category, self.catalog.list(category).await?));
        }
        Ok(aggregate(&listings))
    }

    /// The most recently created records across all categories.
    #[instrument(skip(self))]
    pub async fn recent(&self, limit: usize) -> Result<Vec<FileRecord>, QueryError> {
        let mut merged = Vec::new();
        for category in Category::ALL {
            merged.extend(self.catalog.list(category).await?);
        }
        merged.sort_by(by_date_desc);
        merged.truncate(limit);
        Ok(merged)
    }

    /// Search every category for a term.
    #[instrument(skip(self))]
    pub async fn search_all(&self, term: &str) -> Result<SearchResults, QueryError> {
        Ok(SearchResults {
            notes: self.list(Category::Notes, Some(term)).await?,
            images: self.list(Category::Images, Some(term)).await?,
            videos: self.list(Category::Videos, Some(term)).await?,
        })
    }
}

fn matches_term(record: &FileRecord, needle: &str) -> bool {
    let title_hit = record
        .title
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
        .contains(needle);
    let description_hit = record
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
        .contains(needle);
    title_hit || description_hit
}

#[cfg(test)]
mod tests {
    use memvault_catalog_memory::MemoryCatalog;
    use memvault_core::CategoryDetails;

    use super::*;

    fn record(category: Category, title: Option<&str>, description: Option<&str>) -> FileRecord {
        let details = match category {
            Category::Notes => CategoryDetails::Notes { tags: vec![] },
            Category::Images => CategoryDetails::Images {
                dimensions: memvault_core::Dimensions::default(),
                exif: None,
            },
            Category::Videos => CategoryDetails::Videos {
                duration_seconds: 0.0,
                resolution: None,
                thumbnail_key: None,
            },
        };
        FileRecord::new(
            title.map(str::to_owned),
            description.map(str::to_owned),
            format!("{}/x", category.folder()),
            "memory://memory-vault/x".to_owned(),
            "x.bin".to_owned(),
            "application/pdf".to_owned(),
            100,
            details,
        )
    }

    async fn engine_with(records: Vec<FileRecord>) -> (CatalogQueryEngine, Arc<MemoryCatalog>) {
        let catalog = Arc::new(MemoryCatalog::new());
        for record in &records {
            catalog.create(record).await.unwrap();
        }
        (CatalogQueryEngine::new(catalog.clone()), catalog)
    }

    #[tokio::test]
    async fn empty_term_returns_everything() {
        let (engine, _) = engine_with(vec![
            record(Category::Notes, Some("alpha"), None),
            record(Category::Notes, Some("beta"), None),
        ])
        .await;

        assert_eq!(engine.list(Category::Notes, None).await.unwrap().len(), 2);
        assert_eq!(
            engine.list(Category::Notes, Some("")).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn search_matches_title_and_description_case_insensitively() {
        let (engine, _) = engine_with(vec![
            record(Category::Notes, Some("Quarterly FOO report"), None),
            record(Category::Notes, None, Some("contains foo inside")),
            record(Category::Notes, Some("unrelated"), Some("nothing here")),
            record(Category::Notes, None, None),
        ])
        .await;

        let hits = engine.list(Category::Notes, Some("foo")).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert!(
            hits.iter()
                .all(|r| r.display_name().to_lowercase().contains("foo")
                    || r.description.as_deref().unwrap_or_default().contains("foo"))
        );
    }

    #[tokio::test]
    async fn search_is_scoped_to_the_requested_category() {
        let (engine, _) = engine_with(vec![
            record(Category::Notes, Some("shared term"), None),
            record(Category::Images, Some("shared term"), None),
        ])
        .await;

        let hits = engine.list(Category::Notes, Some("shared")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category(), Category::Notes);
    }

    #[tokio::test]
    async fn counts_cover_all_categories() {
        let (engine, _) = engine_with(vec![
            record(Category::Notes, None, None),
            record(Category::Notes, None, None),
            record(Category::Videos, None, None),
        ])
        .await;

        let counts = engine.counts().await.unwrap();
        assert_eq!(counts.notes, 2);
        assert_eq!(counts.images, 0);
        assert_eq!(counts.videos, 1);
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn aggregate_stats_sum_bytes_across_categories() {
        let (engine, _) = engine_with(vec![
            record(Category::Notes, None, None),
            record(Category::Images, None, None),
        ])
        .await;

        let stats = engine.aggregate_stats().await.unwrap();
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_bytes, 200);
        assert!(stats.usage_percent > 0.0);
    }

    #[tokio::test]
    async fn recent_merges_categories_newest_first() {
        let mut oldest = record(Category::Notes, Some("oldest"), None);
        oldest.created_at = oldest.created_at - chrono::Duration::hours(3);
        let mut middle = record(Category::Videos, Some("middle"), None);
        middle.created_at = middle.created_at - chrono::Duration::hours(2);
        let newest = record(Category::Images, Some("newest"), None);

        let (engine, _) = engine_with(vec![oldest, middle, newest.clone()]).await;

        let recent = engine.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, newest.id);
        assert_eq!(recent[0].display_name(), "newest");
        assert_eq!(recent[1].display_name(), "middle");
    }

    #[tokio::test]
    async fn recent_with_large_limit_returns_everything() {
        let (engine, _) = engine_with(vec![
            record(Category::Notes, None, None),
            record(Category::Images, None, None),
        ])
        .await;
        assert_eq!(engine.recent(50).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_all_groups_hits_by_category() {
        let (engine, _) = engine_with(vec![
            record(Category::Notes, Some("project plan"), None),
            record(Category::Images, None, Some("plan sketch")),
            record(Category::Videos, Some("unrelated"), None),
        ])
        .await;

        let results = engine.search_all("plan").await.unwrap();
        assert_eq!(results.notes.len(), 1);
        assert_eq!(results.images.len(), 1);
        assert!(results.videos.is_empty());
        assert_eq!(results.total(), 2);
    }
}
