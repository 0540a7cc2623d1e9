use serde::{Deserialize, Serialize};

/// Shared base configuration for the S3 and DynamoDB backends.
///
/// Carries the region, an endpoint URL override for local development
/// (e.g. `LocalStack`), and an optional STS assume-role ARN.
#[derive(Clone, Serialize, Deserialize)]
pub struct AwsBaseConfig {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Optional endpoint URL override for local development
    /// (e.g. `http://localhost:4566`).
    pub endpoint_url: Option<String>,

    /// Optional IAM role ARN to assume via STS.
    pub role_arn: Option<String>,

    /// Optional STS session name (defaults to `"memvault-backend"`).
    #[serde(default)]
    pub session_name: Option<String>,
}

impl std::fmt::Debug for AwsBaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsBaseConfig")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("role_arn", &self.role_arn.as_ref().map(|_| "[REDACTED]"))
            .field("session_name", &self.session_name)
            .finish()
    }
}

impl AwsBaseConfig {
    /// Create a new `AwsBaseConfig` with the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            role_arn: None,
            session_name: None,
        }
    }

    /// Set an endpoint URL override for local development.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set an IAM role ARN to assume via STS.
    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    /// Set the STS session name for assume-role.
    #[must_use]
    pub fn with_session_name(mut self, session_name: impl Into<String>) -> Self {
        self.session_name = Some(session_name.into());
        self
    }
}

impl Default for AwsBaseConfig {
    fn default() -> Self {
        Self::new("us-east-1")
    }
}
