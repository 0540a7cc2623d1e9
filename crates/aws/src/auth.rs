use tracing::{debug, info};

use crate::config::AwsBaseConfig;

/// Build an AWS SDK configuration from the given [`AwsBaseConfig`].
///
/// Uses the standard AWS SDK environment credential chain and optionally:
/// - Overrides the endpoint URL for local development (e.g. `LocalStack`)
/// - Assumes an IAM role via STS if `role_arn` is configured, with
///   automatic credential refresh before expiry
///
/// # Examples
///
/// ```no_run
/// use memvault_aws::config::AwsBaseConfig;
/// use memvault_aws::auth::build_sdk_config;
///
/// # async fn example() {
/// let config = AwsBaseConfig::new("us-east-1")
///     .with_endpoint_url("http://localhost:4566");
/// let sdk_config = build_sdk_config(&config).await;
/// # }
/// ```
pub async fn build_sdk_config(config: &AwsBaseConfig) -> aws_config::SdkConfig {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    // The SDK's AssumeRoleProvider refreshes credentials before they
    // expire, so long-lived store handles keep working past the first
    // session hour.
    if let Some(role_arn) = &config.role_arn {
        let session_name = config.session_name.as_deref().unwrap_or("memvault-backend");

        info!(role_arn = %role_arn, session_name = %session_name, "assuming IAM role via STS");

        // Load the base config first so the assume-role provider inherits
        // the endpoint override and base credentials for STS calls.
        let base_config = loader.load().await;

        let assume_role_provider = aws_config::sts::AssumeRoleProvider::builder(role_arn)
            .session_name(session_name)
            .region(aws_config::Region::new(config.region.clone()))
            .configure(&base_config)
            .build()
            .await;

        let mut final_loader = aws_config::from_env()
            .region(aws_config::Region::new(config.region.clone()))
            .credentials_provider(assume_role_provider);

        if let Some(endpoint) = &config.endpoint_url {
            final_loader = final_loader.endpoint_url(endpoint);
        }

        return final_loader.load().await;
    }

    loader.load().await
}
