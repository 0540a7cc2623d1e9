use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, error, info, instrument};

use memvault_aws::{AwsError, build_sdk_config, classify_sdk_error};
use memvault_blob::{BlobError, BlobStore, StoredBlob, object_key};

use crate::config::S3BlobConfig;

/// S3-backed implementation of [`BlobStore`].
///
/// The SDK client is cheap to clone and internally pooled; one store
/// handle is shared across concurrent ingest and delete operations.
pub struct S3BlobStore {
    config: S3BlobConfig,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3BlobStore {
    /// Create a new `S3BlobStore` by building an AWS SDK client.
    pub async fn new(config: S3BlobConfig) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        let client = aws_sdk_s3::Client::new(&sdk_config);
        Self { config, client }
    }

    /// Create an `S3BlobStore` with a pre-built client (for testing).
    pub fn with_client(config: S3BlobConfig, client: aws_sdk_s3::Client) -> Self {
        Self { config, client }
    }

    /// The underlying SDK client, for bootstrap helpers.
    #[must_use]
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }

    /// The store configuration.
    #[must_use]
    pub fn config(&self) -> &S3BlobConfig {
        &self.config
    }
}

fn into_blob_error(err: AwsError) -> BlobError {
    match err {
        AwsError::Connection(msg) => BlobError::Connection(msg),
        AwsError::Timeout => BlobError::Connection("request timed out".to_owned()),
        AwsError::Throttled => BlobError::Backend("request throttled".to_owned()),
        AwsError::ServiceError(msg) => BlobError::Backend(msg),
        AwsError::Configuration(msg) => BlobError::Configuration(msg),
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    #[instrument(skip(self, data), fields(bucket = %self.config.bucket, folder = folder, size = data.len()))]
    async fn put(
        &self,
        data: Bytes,
        content_type: &str,
        folder: &str,
        original_filename: &str,
    ) -> Result<StoredBlob, BlobError> {
        let key = object_key(folder, original_filename);
        let url = self.config.object_url(&key);

        debug!(key = %key, content_type = %content_type, "uploading object to S3");

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type(content_type)
            .body(aws_sdk_s3::primitives::ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, key = %key, "S3 put_object failed");
                into_blob_error(classify_sdk_error(&err_str))
            })?;

        info!(key = %key, "S3 object uploaded");

        Ok(StoredBlob { key, url })
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn get(&self, key: &str) -> Result<Bytes, BlobError> {
        debug!(key = %key, "downloading object from S3");

        let result = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    return Err(BlobError::NotFound(key.to_owned()));
                }
                let err_str = service_err.to_string();
                error!(error = %err_str, key = %key, "S3 get_object failed");
                return Err(into_blob_error(classify_sdk_error(&err_str)));
            }
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| BlobError::Backend(format!("failed to read S3 body: {e}")))?
            .into_bytes();

        debug!(key = %key, size = data.len(), "S3 object downloaded");
        Ok(data)
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn delete(&self, key: &str) -> Result<bool, BlobError> {
        // S3's DeleteObject succeeds for missing keys, so existence is
        // checked first to honor the delete-returns-false contract.
        let head = self
            .client
            .head_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await;

        if let Err(err) = head {
            let service_err = err.into_service_error();
            if service_err.is_not_found() {
                debug!(key = %key, "S3 object absent, delete is a no-op");
                return Ok(false);
            }
            let err_str = service_err.to_string();
            error!(error = %err_str, key = %key, "S3 head_object failed");
            return Err(into_blob_error(classify_sdk_error(&err_str)));
        }

        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, key = %key, "S3 delete_object failed");
                into_blob_error(classify_sdk_error(&err_str))
            })?;

        info!(key = %key, "S3 object deleted");
        Ok(true)
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn health_check(&self) -> Result<(), BlobError> {
        debug!("performing S3 health check");
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "S3 health check failed");
                BlobError::Connection(format!("S3 health check failed: {e}"))
            })?;
        debug!("S3 health check passed");
        Ok(())
    }
}
