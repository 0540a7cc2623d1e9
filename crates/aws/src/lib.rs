//! Shared AWS plumbing for the MemVault S3 and DynamoDB backends.
//!
//! Both backends take the same [`AwsBaseConfig`] (region, endpoint
//! override for `LocalStack`, optional STS assume-role) and classify SDK
//! failures through [`classify_sdk_error`] before mapping them into their
//! own error types.

pub mod auth;
pub mod config;
pub mod error;

pub use auth::build_sdk_config;
pub use config::AwsBaseConfig;
pub use error::{AwsError, classify_sdk_error};
