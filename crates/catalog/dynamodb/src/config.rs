use serde::{Deserialize, Serialize};

use memvault_aws::AwsBaseConfig;
use memvault_core::Category;

/// Configuration for the DynamoDB catalog.
///
/// One table per category, named `MemoryVault{Notes,Images,Videos}` by
/// default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamoCatalogConfig {
    /// Shared AWS configuration (region, endpoint URL, role ARN).
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// Table holding notes records.
    pub notes_table: String,

    /// Table holding image records.
    pub images_table: String,

    /// Table holding video records.
    pub videos_table: String,
}

impl DynamoCatalogConfig {
    /// Create a new `DynamoCatalogConfig` with the default table names.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::new(region),
            notes_table: "MemoryVaultNotes".to_owned(),
            images_table: "MemoryVaultImages".to_owned(),
            videos_table: "MemoryVaultVideos".to_owned(),
        }
    }

    /// Set the endpoint URL override (for `LocalStack`).
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.aws.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Override a category's table name.
    #[must_use]
    pub fn with_table(mut self, category: Category, table: impl Into<String>) -> Self {
        match category {
            Category::Notes => self.notes_table = table.into(),
            Category::Images => self.images_table = table.into(),
            Category::Videos => self.videos_table = table.into(),
        }
        self
    }

    /// The table name backing a category's collection.
    #[must_use]
    pub fn table_for(&self, category: Category) -> &str {
        match category {
            Category::Notes => &self.notes_table,
            Category::Images => &self.images_table,
            Category::Videos => &self.videos_table,
        }
    }
}
