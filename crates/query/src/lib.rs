//! Catalog query engine for MemVault.
//!
//! The metadata store supports nothing but full scans, so every read-side
//! feature lives here: per-category listing with substring search, stable
//! multi-key sorting, aggregate statistics with a 1 GiB usage meter,
//! recent-uploads merging, and cross-category search. All of it operates
//! on best-effort snapshots; concurrent writers may be partially visible.

mod engine;
mod format;
mod sort;
mod stats;

pub use engine::{CatalogQueryEngine, CategoryCounts, QueryError, SearchResults};
pub use format::format_size;
pub use sort::{SortKey, SortOrder, SortParseError, sort_records};
pub use stats::{CategoryTotals, StorageStats, aggregate};
