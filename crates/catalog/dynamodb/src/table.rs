use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
};

use memvault_core::Category;

use crate::config::DynamoCatalogConfig;

/// Create one category table programmatically.
///
/// Each table uses a simple primary key: the category's id attribute as a
/// string partition key. This is intended for tests and local
/// development. In production you would typically provision the tables
/// via Infrastructure-as-Code tooling.
///
/// # Errors
///
/// Returns an error if the `CreateTable` call fails for reasons other
/// than the table already existing.
pub async fn create_table(
    client: &Client,
    table_name: &str,
    id_attribute: &str,
) -> Result<(), aws_sdk_dynamodb::Error> {
    let result = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(id_attribute)
                .key_type(KeyType::Hash)
                .build()
                .expect("valid key schema"),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(id_attribute)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("valid attribute definition"),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(5)
                .write_capacity_units(5)
                .build()
                .expect("valid throughput"),
        )
        .send()
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) => {
            // Tolerate "table already exists" errors so `create_table` is idempotent.
            let service_err = err.into_service_error();
            if service_err.is_resource_in_use_exception() {
                Ok(())
            } else {
                Err(service_err.into())
            }
        }
    }
}

/// Create all three category tables.
///
/// # Errors
///
/// Returns the first `CreateTable` failure encountered.
pub async fn bootstrap_tables(
    client: &Client,
    config: &DynamoCatalogConfig,
) -> Result<(), aws_sdk_dynamodb::Error> {
    for category in Category::ALL {
        create_table(client, config.table_for(category), category.id_attribute()).await?;
    }
    Ok(())
}
