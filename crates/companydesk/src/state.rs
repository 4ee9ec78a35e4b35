//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The storage backend is chosen at compile time via
//! feature flags.

use std::sync::Arc;

use companydesk_core::storage::CompanyRepository;

use crate::config::Config;

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "dynamodb", feature = "inmemory"))]
compile_error!("Cannot enable both 'dynamodb' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Company repository.
    pub company_repo: Arc<dyn CompanyRepository>,
}

impl AppState {
    /// Creates a new AppState around the given repository.
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    /// Creates the AppState for the enabled storage backend.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(_config: &Config) -> anyhow::Result<Self> {
        use crate::storage::InMemoryRepository;

        tracing::info!(backend = "inmemory", "Initializing storage");
        Ok(Self::new(Arc::new(InMemoryRepository::new())))
    }

    /// Creates the AppState for the enabled storage backend.
    #[cfg(feature = "dynamodb")]
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        use crate::storage::DynamoDbRepository;

        tracing::info!(
            backend = "dynamodb",
            table = %config.company_table,
            region = %config.aws_region,
            endpoint = ?config.aws_endpoint_url,
            "Initializing storage"
        );
        let repo = DynamoDbRepository::from_config(config).await;
        Ok(Self::new(Arc::new(repo)))
    }
}
