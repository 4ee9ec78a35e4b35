//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! company records. Company items are schema-less, so every attribute is
//! mapped to and from a `serde_json::Value`.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use serde_json::{Map, Number, Value};

use companydesk_core::company::{Company, CompanyId, UpdateExpression, ID_FIELD};
use companydesk_core::storage::RepositoryError;

// ============================================================================
// Keys
// ============================================================================

/// Primary key attribute for a company.
pub fn company_key(id: CompanyId) -> AttributeValue {
    AttributeValue::N(id.to_string())
}

// ============================================================================
// Company conversions
// ============================================================================

/// Convert a Company to DynamoDB item.
pub fn company_to_item(company: &Company) -> HashMap<String, AttributeValue> {
    let mut item: HashMap<String, AttributeValue> = company
        .attributes
        .iter()
        .filter(|(name, _)| name.as_str() != ID_FIELD)
        .map(|(name, value)| (name.clone(), json_to_attribute(value)))
        .collect();

    item.insert(ID_FIELD.to_string(), company_key(company.id));

    item
}

/// Convert a DynamoDB item to Company.
pub fn item_to_company(item: &HashMap<String, AttributeValue>) -> Result<Company, RepositoryError> {
    let id = get_company_id(item, ID_FIELD)?;

    let mut attributes = Map::new();
    for (name, value) in item {
        if name == ID_FIELD {
            continue;
        }
        attributes.insert(name.clone(), attribute_to_json(value)?);
    }

    Ok(Company { id, attributes })
}

/// Convert the placeholder values of an update expression.
pub fn update_values(update: &UpdateExpression) -> HashMap<String, AttributeValue> {
    update
        .values()
        .iter()
        .map(|(placeholder, value)| (placeholder.clone(), json_to_attribute(value)))
        .collect()
}

/// Convert the placeholder names of an update expression.
pub fn update_names(update: &UpdateExpression) -> HashMap<String, String> {
    update
        .names()
        .iter()
        .map(|(placeholder, name)| (placeholder.clone(), name.clone()))
        .collect()
}

// ============================================================================
// Value conversions
// ============================================================================

/// Convert a JSON value to an AttributeValue.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}

/// Convert an AttributeValue to a JSON value.
///
/// Sets become arrays and binary values become base64 strings.
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, RepositoryError> {
    let json = match value {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::B(blob) => Value::String(encode_blob(blob.as_ref())),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(attribute_to_json)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(fields) => {
            let mut map = Map::new();
            for (name, value) in fields {
                map.insert(name.clone(), attribute_to_json(value)?);
            }
            Value::Object(map)
        }
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(items) => Value::Array(
            items
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(items) => Value::Array(
            items
                .iter()
                .map(|blob| Value::String(encode_blob(blob.as_ref())))
                .collect(),
        ),
        other => {
            return Err(RepositoryError::Serialization(format!(
                "Unsupported attribute value: {:?}",
                other
            )))
        }
    };

    Ok(json)
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a DynamoDB number, keeping integers as integers.
fn parse_number(n: &str) -> Result<Number, RepositoryError> {
    if let Ok(int) = n.parse::<i64>() {
        return Ok(Number::from(int));
    }
    if let Ok(uint) = n.parse::<u64>() {
        return Ok(Number::from(uint));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| RepositoryError::InvalidData(format!("Invalid number: {}", n)))
}

fn encode_blob(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Get the required numeric company id.
fn get_company_id(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<CompanyId, RepositoryError> {
    let n = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;

    n.parse::<CompanyId>()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid company id {}: {}", n, e)))
}
