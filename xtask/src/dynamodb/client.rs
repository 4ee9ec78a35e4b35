//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::types::{self, KeyType, ScalarAttributeType};
use aws_sdk_dynamodb::Client;

use super::config::{AttributeType, KeyAttribute};
use super::error::{DynamodbError, Result};
use super::planning::{TableState, TableStatus};

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    Client::new(&loader.load().await)
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err) => {
            let not_found = err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception());
            return if not_found {
                Ok(None)
            } else {
                Err(DynamodbError::AwsSdk(err.to_string()))
            };
        }
    };

    let Some(table) = response.table() else {
        return Ok(None);
    };

    let status = match table.table_status() {
        Some(types::TableStatus::Creating) => TableStatus::Creating,
        Some(types::TableStatus::Updating) => TableStatus::Updating,
        Some(types::TableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    };

    let hash_key_name = table
        .key_schema()
        .iter()
        .find(|key| *key.key_type() == KeyType::Hash)
        .map(|key| key.attribute_name());

    let partition_key = hash_key_name.and_then(|name| {
        table
            .attribute_definitions()
            .iter()
            .find(|def| def.attribute_name() == name)
            .and_then(|def| from_scalar_type(def.attribute_type()))
            .map(|attribute_type| KeyAttribute {
                name: name.to_string(),
                attribute_type,
            })
    });

    Ok(Some(TableState {
        status,
        partition_key,
    }))
}

fn from_scalar_type(scalar: &ScalarAttributeType) -> Option<AttributeType> {
    match scalar {
        ScalarAttributeType::S => Some(AttributeType::String),
        ScalarAttributeType::N => Some(AttributeType::Number),
        _ => None,
    }
}
