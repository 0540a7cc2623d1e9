//! Blob storage capability for MemVault.
//!
//! Defines the [`BlobStore`] trait that ingestion and retrieval are written
//! against, the key layout shared by every backend, and a conformance test
//! suite backends run to prove they honor the contract.

pub mod error;
pub mod key;
pub mod store;
pub mod testing;

pub use error::BlobError;
pub use key::{object_key, sanitize_filename};
pub use store::{BlobStore, StoredBlob};
