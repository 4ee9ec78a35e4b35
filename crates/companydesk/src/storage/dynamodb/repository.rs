//! DynamoDB repository implementation.
//!
//! Implements `CompanyRepository` from `companydesk_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::ReturnValue;
use aws_sdk_dynamodb::Client;

use companydesk_core::company::{Company, CompanyId, UpdateExpression, ID_FIELD};
use companydesk_core::storage::{CompanyRepository, RepositoryError, Result};

use super::conversions::{
    company_key, company_to_item, item_to_company, update_names, update_values,
};
use super::error::{map_get_item_error, map_put_item_error, map_scan_error, map_update_item_error};
use crate::config::Config;

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain with the configured region.
    /// When `aws_endpoint_url` is set (e.g. a local DynamoDB), requests go there.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.company_table.clone())
    }
}

#[async_trait]
impl CompanyRepository for DynamoDbRepository {
    async fn get_company(&self, id: CompanyId) -> Result<Option<Company>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_FIELD, company_key(id))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_company(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_company(&self, company: &Company) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(company_to_item(company)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn update_company(&self, id: CompanyId, update: &UpdateExpression) -> Result<Company> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_FIELD, company_key(id))
            .update_expression(update.expression())
            .set_expression_attribute_names(Some(update_names(update)))
            .set_expression_attribute_values(Some(update_values(update)))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(map_update_item_error)?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::QueryFailed(format!("UpdateItem returned no attributes for {}", id))
        })?;

        item_to_company(&attributes)
    }

    async fn scan_companies(&self) -> Result<Vec<Company>> {
        let mut companies = Vec::new();
        let mut start_key = None;

        // A single Scan call stops at 1 MB; keep going until the table is exhausted.
        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            for item in result.items.unwrap_or_default() {
                companies.push(item_to_company(&item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(
            table = %self.table_name,
            count = companies.len(),
            "Scanned companies"
        );

        Ok(companies)
    }
}
