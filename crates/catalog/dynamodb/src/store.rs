use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use memvault_aws::{AwsError, build_sdk_config, classify_sdk_error};
use memvault_catalog::{CatalogError, MetadataCatalog};
use memvault_core::{Category, FileRecord};

use crate::config::DynamoCatalogConfig;
use crate::item::{from_item, to_item};

/// DynamoDB-backed implementation of [`MetadataCatalog`].
///
/// Listing is a full table scan with no secondary index; search and sort
/// happen in the query engine. This mirrors the store's contract and is a
/// known scalability characteristic, not an oversight.
pub struct DynamoCatalog {
    config: DynamoCatalogConfig,
    client: aws_sdk_dynamodb::Client,
}

impl std::fmt::Debug for DynamoCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoCatalog")
            .field("config", &self.config)
            .field("client", &"<DynamoClient>")
            .finish()
    }
}

impl DynamoCatalog {
    /// Create a new `DynamoCatalog` by building an AWS SDK client.
    pub async fn new(config: DynamoCatalogConfig) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        let client = aws_sdk_dynamodb::Client::new(&sdk_config);
        Self { config, client }
    }

    /// Create a `DynamoCatalog` with a pre-built client (for testing).
    pub fn with_client(config: DynamoCatalogConfig, client: aws_sdk_dynamodb::Client) -> Self {
        Self { config, client }
    }

    /// The underlying SDK client, for bootstrap helpers.
    #[must_use]
    pub fn client(&self) -> &aws_sdk_dynamodb::Client {
        &self.client
    }

    /// The catalog configuration.
    #[must_use]
    pub fn config(&self) -> &DynamoCatalogConfig {
        &self.config
    }
}

fn into_catalog_error(err: AwsError) -> CatalogError {
    match err {
        AwsError::Connection(msg) => CatalogError::Connection(msg),
        AwsError::Timeout => CatalogError::Connection("request timed out".to_owned()),
        AwsError::Throttled => CatalogError::Backend("request throttled".to_owned()),
        AwsError::ServiceError(msg) => CatalogError::Backend(msg),
        AwsError::Configuration(msg) => CatalogError::Configuration(msg),
    }
}

#[async_trait]
impl MetadataCatalog for DynamoCatalog {
    #[instrument(skip(self, record), fields(category = %record.category(), id = %record.id))]
    async fn create(&self, record: &FileRecord) -> Result<(), CatalogError> {
        let category = record.category();
        let table = self.config.table_for(category);

        debug!(table = %table, "writing catalog record");

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, table = %table, "DynamoDB put_item failed");
                into_catalog_error(classify_sdk_error(&err_str))
            })?;

        info!(table = %table, id = %record.id, "catalog record created");
        Ok(())
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn get(&self, category: Category, id: Uuid) -> Result<Option<FileRecord>, CatalogError> {
        let table = self.config.table_for(category);

        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(
                category.id_attribute(),
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, table = %table, "DynamoDB get_item failed");
                into_catalog_error(classify_sdk_error(&err_str))
            })?;

        output
            .item
            .map(|item| from_item(category, &item))
            .transpose()
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn list(&self, category: Category) -> Result<Vec<FileRecord>, CatalogError> {
        let table = self.config.table_for(category);

        debug!(table = %table, "scanning catalog collection");

        let mut items = Vec::new();
        let mut exclusive_start_key = None;
        loop {
            let mut request = self.client.scan().table_name(table);
            if let Some(key) = exclusive_start_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }
            let page = request.send().await.map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, table = %table, "DynamoDB scan failed");
                into_catalog_error(classify_sdk_error(&err_str))
            })?;

            items.extend(page.items.unwrap_or_default());

            exclusive_start_key = page.last_evaluated_key;
            if exclusive_start_key.is_none() {
                break;
            }
        }

        debug!(table = %table, count = items.len(), "scan complete");

        items
            .iter()
            .map(|item| from_item(category, item))
            .collect()
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn delete(&self, category: Category, id: Uuid) -> Result<bool, CatalogError> {
        let table = self.config.table_for(category);

        let output = self
            .client
            .delete_item()
            .table_name(table)
            .key(
                category.id_attribute(),
                AttributeValue::S(id.to_string()),
            )
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                error!(error = %err_str, table = %table, "DynamoDB delete_item failed");
                into_catalog_error(classify_sdk_error(&err_str))
            })?;

        let existed = output.attributes.is_some();
        info!(table = %table, id = %id, existed, "catalog record deleted");
        Ok(existed)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), CatalogError> {
        debug!("performing DynamoDB health check");
        for category in Category::ALL {
            let table = self.config.table_for(category);
            self.client
                .describe_table()
                .table_name(table)
                .send()
                .await
                .map_err(|e| {
                    error!(error = %e, table = %table, "DynamoDB health check failed");
                    CatalogError::Connection(format!("table '{table}' unreachable: {e}"))
                })?;
        }
        debug!("DynamoDB health check passed");
        Ok(())
    }
}
