use async_trait::async_trait;

use crate::company::{Company, CompanyId, UpdateExpression};

use super::Result;

/// Repository for company records in a key-value document store.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Gets a company by its ID.
    async fn get_company(&self, id: CompanyId) -> Result<Option<Company>>;

    /// Stores a company, replacing any record with the same ID.
    async fn put_company(&self, company: &Company) -> Result<()>;

    /// Applies an update to a company and returns the record as it is after
    /// the update. A missing company is created from the update alone.
    async fn update_company(&self, id: CompanyId, update: &UpdateExpression) -> Result<Company>;

    /// Reads every company in the store.
    async fn scan_companies(&self) -> Result<Vec<Company>>;
}
