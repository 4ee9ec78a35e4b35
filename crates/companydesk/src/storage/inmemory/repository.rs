//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use companydesk_core::company::{Company, CompanyId, UpdateExpression};
use companydesk_core::storage::{CompanyRepository, Result};

/// In-memory storage backend.
///
/// Scans return companies in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    companies: Arc<RwLock<BTreeMap<CompanyId, Company>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with the given companies.
    #[allow(dead_code)]
    pub fn with_companies(companies: impl IntoIterator<Item = Company>) -> Self {
        let companies = companies.into_iter().map(|c| (c.id, c)).collect();
        Self {
            companies: Arc::new(RwLock::new(companies)),
        }
    }
}

#[async_trait]
impl CompanyRepository for InMemoryRepository {
    async fn get_company(&self, id: CompanyId) -> Result<Option<Company>> {
        let companies = self.companies.read().await;
        Ok(companies.get(&id).cloned())
    }

    async fn put_company(&self, company: &Company) -> Result<()> {
        let mut companies = self.companies.write().await;
        companies.insert(company.id, company.clone());
        Ok(())
    }

    async fn update_company(&self, id: CompanyId, update: &UpdateExpression) -> Result<Company> {
        let mut companies = self.companies.write().await;
        let company = companies.entry(id).or_insert_with(|| Company::new(id));
        update.apply_to(&mut company.attributes);
        Ok(company.clone())
    }

    async fn scan_companies(&self) -> Result<Vec<Company>> {
        let companies = self.companies.read().await;
        Ok(companies.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use companydesk_core::company::CLIENT_STATUS_FIELD;

    fn acme() -> Company {
        Company::new(CompanyId(123456))
            .with_attribute("name", "Acme")
            .with_attribute("city", "Sydney")
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let repo = InMemoryRepository::new();
        repo.put_company(&acme()).await.unwrap();

        let fetched = repo.get_company(CompanyId(123456)).await.unwrap();
        assert_eq!(fetched, Some(acme()));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get_company(CompanyId(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites_same_id() {
        let repo = InMemoryRepository::with_companies([acme()]);
        let replacement = Company::new(CompanyId(123456)).with_attribute("name", "Globex");

        repo.put_company(&replacement).await.unwrap();

        let fetched = repo.get_company(CompanyId(123456)).await.unwrap().unwrap();
        assert_eq!(fetched, replacement);
    }

    #[tokio::test]
    async fn test_update_merges_and_returns_full_record() {
        let repo = InMemoryRepository::with_companies([acme()]);
        let update = UpdateExpression::from_fields(
            json!({ "name": "Acme Pty Ltd", "staff": 40 })
                .as_object()
                .unwrap(),
        )
        .unwrap();

        let updated = repo
            .update_company(CompanyId(123456), &update)
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&updated).unwrap(),
            json!({ "id": 123456, "name": "Acme Pty Ltd", "city": "Sydney", "staff": 40 })
        );
        assert_eq!(
            repo.get_company(CompanyId(123456)).await.unwrap(),
            Some(updated)
        );
    }

    #[tokio::test]
    async fn test_update_missing_creates_record() {
        let repo = InMemoryRepository::new();
        let update = UpdateExpression::set_field(CLIENT_STATUS_FIELD, json!(true)).unwrap();

        let updated = repo.update_company(CompanyId(42), &update).await.unwrap();

        assert_eq!(updated.id, CompanyId(42));
        assert!(updated.is_active_client());
    }

    #[tokio::test]
    async fn test_scan_returns_all_in_id_order() {
        let repo = InMemoryRepository::with_companies([
            Company::new(CompanyId(300000)),
            Company::new(CompanyId(100000)),
            Company::new(CompanyId(200000)),
        ]);

        let ids: Vec<i64> = repo
            .scan_companies()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id.0)
            .collect();

        assert_eq!(ids, vec![100000, 200000, 300000]);
    }
}
