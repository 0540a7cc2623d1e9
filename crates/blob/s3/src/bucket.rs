use aws_sdk_s3::Client;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

/// Create the vault bucket programmatically.
///
/// Intended for tests and local development. In production the bucket
/// would typically be provisioned via Infrastructure-as-Code tooling.
///
/// # Errors
///
/// Returns an error if the `CreateBucket` call fails for reasons other
/// than the bucket already existing.
pub async fn create_bucket(
    client: &Client,
    bucket: &str,
    region: &str,
) -> Result<(), aws_sdk_s3::Error> {
    let mut request = client.create_bucket().bucket(bucket);

    // us-east-1 is the default location and rejects an explicit constraint.
    if region != "us-east-1" {
        request = request.create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build(),
        );
    }

    match request.send().await {
        Ok(_) => Ok(()),
        Err(err) => {
            // Tolerate "already exists" errors so `create_bucket` is idempotent.
            let service_err = err.into_service_error();
            if service_err.is_bucket_already_owned_by_you()
                || service_err.is_bucket_already_exists()
            {
                Ok(())
            } else {
                Err(service_err.into())
            }
        }
    }
}
