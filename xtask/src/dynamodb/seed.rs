//! Seed command implementation.

use std::collections::{HashMap, HashSet};

use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use rand::Rng;
use serde_json::Value;

use companydesk_core::company::{Company, CompanyId, CLIENT_STATUS_FIELD, ID_FIELD};

use super::error::{DynamodbError, Result};

/// BatchWriteItem accepts at most 25 requests.
const BATCH_SIZE: usize = 25;

/// Number of distinct six-digit company ids.
pub const MAX_SEED_COUNT: u32 = 900_000;

/// Retries for items DynamoDB reports as unprocessed.
const MAX_UNPROCESSED_RETRIES: u32 = 5;

const NAME_PREFIXES: [&str; 10] = [
    "Acme", "Globex", "Initech", "Umbrella", "Stark", "Wayne", "Hooli", "Vandelay", "Wonka",
    "Tyrell",
];
const NAME_SUFFIXES: [&str; 5] = ["Pty Ltd", "Group", "Holdings", "Labs", "Partners"];
const INDUSTRIES: [&str; 6] = [
    "Construction",
    "Retail",
    "Healthcare",
    "Logistics",
    "Hospitality",
    "Software",
];
const CITIES: [&str; 6] = [
    "Sydney",
    "Melbourne",
    "Brisbane",
    "Perth",
    "Adelaide",
    "Hobart",
];

/// Generate demo companies with distinct six-digit ids.
///
/// Each company is an active client with probability `active_ratio`.
pub fn generate_seed_companies<R: Rng>(rng: &mut R, count: u32, active_ratio: f64) -> Vec<Company> {
    let mut seen = HashSet::new();
    let mut companies = Vec::with_capacity(count as usize);

    while companies.len() < count as usize {
        let id = CompanyId::generate_with(rng);
        if !seen.insert(id) {
            continue;
        }

        let i = companies.len();
        let name = format!(
            "{} {}",
            NAME_PREFIXES[i % NAME_PREFIXES.len()],
            NAME_SUFFIXES[(i / NAME_PREFIXES.len()) % NAME_SUFFIXES.len()]
        );

        companies.push(
            Company::new(id)
                .with_attribute("name", name)
                .with_attribute("industry", INDUSTRIES[rng.random_range(0..INDUSTRIES.len())])
                .with_attribute("city", CITIES[rng.random_range(0..CITIES.len())])
                .with_attribute("employees", rng.random_range(1..=500))
                .with_attribute(CLIENT_STATUS_FIELD, rng.random_bool(active_ratio)),
        );
    }

    companies
}

/// Validate that enough distinct six-digit ids exist for `count` companies.
pub fn validate_count(count: u32) -> Result<u32> {
    if count <= MAX_SEED_COUNT {
        Ok(count)
    } else {
        Err(DynamodbError::InvalidCount(count))
    }
}

/// Validate that the active ratio is a probability.
pub fn validate_ratio(ratio: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(DynamodbError::InvalidRatio(ratio))
    }
}

/// Convert a seeded Company to a DynamoDB item.
///
/// Seeded attributes are flat scalars; anything else is stored as its JSON text.
fn company_to_item(company: &Company) -> HashMap<String, AttributeValue> {
    let mut item: HashMap<String, AttributeValue> = company
        .attributes
        .iter()
        .map(|(name, value)| {
            let attribute = match value {
                Value::String(s) => AttributeValue::S(s.clone()),
                Value::Bool(b) => AttributeValue::Bool(*b),
                Value::Number(n) => AttributeValue::N(n.to_string()),
                Value::Null => AttributeValue::Null(true),
                other => AttributeValue::S(other.to_string()),
            };
            (name.clone(), attribute)
        })
        .collect();

    item.insert(ID_FIELD.to_string(), AttributeValue::N(company.id.to_string()));

    item
}

/// Insert companies into DynamoDB.
pub async fn seed_companies(client: &Client, table_name: &str, companies: &[Company]) -> Result<u32> {
    let mut inserted = 0;

    for chunk in companies.chunks(BATCH_SIZE) {
        let mut requests = chunk
            .iter()
            .map(|company| {
                PutRequest::builder()
                    .set_item(Some(company_to_item(company)))
                    .build()
                    .map(|put| WriteRequest::builder().put_request(put).build())
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut attempts = 0;
        while !requests.is_empty() {
            if attempts > MAX_UNPROCESSED_RETRIES {
                return Err(DynamodbError::AwsSdk(format!(
                    "{} items still unprocessed after {} retries",
                    requests.len(),
                    MAX_UNPROCESSED_RETRIES
                )));
            }
            attempts += 1;

            let sent = requests.len();
            let output = client
                .batch_write_item()
                .request_items(table_name, requests)
                .send()
                .await
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

            requests = output
                .unprocessed_items
                .and_then(|mut unprocessed| unprocessed.remove(table_name))
                .unwrap_or_default();

            inserted += (sent - requests.len()) as u32;
        }
    }

    Ok(inserted)
}

/// Format a company for the seed preview.
pub fn format_company(company: &Company) -> String {
    let name = company
        .attributes
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("?");
    let status = if company.is_active_client() {
        "active"
    } else {
        "pending"
    };
    format!("{} - {} ({})", company.id, name, status)
}
