//! S3-backed blob store for MemVault.
//!
//! Implements the [`BlobStore`](memvault_blob::BlobStore) capability on
//! top of `aws-sdk-s3`, with a `LocalStack` endpoint override for local
//! development and an idempotent bucket bootstrap helper.

mod bucket;
mod config;
mod store;

pub use bucket::create_bucket;
pub use config::S3BlobConfig;
pub use store::S3BlobStore;
