//! Core domain types for the MemVault media vault.
//!
//! MemVault stores files of three fixed categories (notes, images, videos),
//! each backed by a blob store plus a per-category metadata catalog. This
//! crate holds the shared vocabulary: the [`Category`] tag and the
//! polymorphic [`FileRecord`] that every other crate in the workspace
//! speaks.

pub mod category;
pub mod record;

pub use category::{Category, CategoryParseError};
pub use record::{CategoryDetails, Dimensions, FileRecord};
