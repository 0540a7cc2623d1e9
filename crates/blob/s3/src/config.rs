use serde::{Deserialize, Serialize};

use memvault_aws::AwsBaseConfig;

/// Configuration for the S3 blob store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3BlobConfig {
    /// Shared AWS configuration (region, endpoint URL, role ARN).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// Bucket holding every vault object.
    pub bucket: String,
}

impl S3BlobConfig {
    /// Create a new `S3BlobConfig` with the given region and bucket.
    pub fn new(region: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
            bucket: bucket.into(),
        }
    }

    /// Set the endpoint URL override (for `LocalStack`).
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.aws.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the IAM role ARN to assume.
    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.aws.role_arn = Some(role_arn.into());
        self
    }

    /// Direct, unsigned URL for an object: `{endpoint}/{bucket}/{key}`.
    ///
    /// When no endpoint override is configured, the standard regional
    /// path-style endpoint is used.
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        match &self.aws.endpoint_url {
            Some(endpoint) => {
                format!("{}/{}/{key}", endpoint.trim_end_matches('/'), self.bucket)
            }
            None => format!(
                "https://s3.{}.amazonaws.com/{}/{key}",
                self.aws.region, self.bucket
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_sets_region_and_bucket() {
        let config = S3BlobConfig::new("us-west-2", "memory-vault");
        assert_eq!(config.aws.region, "us-west-2");
        assert_eq!(config.bucket, "memory-vault");
        assert!(config.aws.endpoint_url.is_none());
    }

    #[test]
    fn object_url_with_endpoint_override() {
        let config = S3BlobConfig::new("us-east-1", "memory-vault")
            .with_endpoint_url("http://localhost:4566");
        assert_eq!(
            config.object_url("images/abc.png"),
            "http://localhost:4566/memory-vault/images/abc.png"
        );
    }

    #[test]
    fn object_url_trims_trailing_slash() {
        let config = S3BlobConfig::new("us-east-1", "memory-vault")
            .with_endpoint_url("http://localhost:4566/");
        assert_eq!(
            config.object_url("notes/a.txt"),
            "http://localhost:4566/memory-vault/notes/a.txt"
        );
    }

    #[test]
    fn object_url_without_override_uses_regional_endpoint() {
        let config = S3BlobConfig::new("eu-west-1", "memory-vault");
        assert_eq!(
            config.object_url("videos/v.mp4"),
            "https://s3.eu-west-1.amazonaws.com/memory-vault/videos/v.mp4"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let config = S3BlobConfig::new("us-east-1", "memory-vault")
            .with_endpoint_url("http://localhost:4566");
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: S3BlobConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.bucket, "memory-vault");
        assert_eq!(
            deserialized.aws.endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
    }
}
