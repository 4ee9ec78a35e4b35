//! Dynamic `SET` update expressions for partial updates.
//!
//! Every field becomes one assignment with positional placeholders for both
//! the attribute name and the value, so field names never need escaping.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::error::UpdateError;
use super::types::ID_FIELD;

/// A `SET` update expression with its placeholder tables.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    expression: String,
    /// `#attrN` -> field name
    names: BTreeMap<String, String>,
    /// `:valueN` -> field value
    values: BTreeMap<String, Value>,
    /// Field name and value in assignment order.
    assignments: Vec<(String, Value)>,
}

fn name_placeholder(index: usize) -> String {
    format!("#attr{index}")
}

fn value_placeholder(index: usize) -> String {
    format!(":value{index}")
}

impl UpdateExpression {
    /// Builds an update that sets every field except `id`.
    ///
    /// Fields are assigned in the order they appear in `fields`.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, UpdateError> {
        Self::from_assignments(
            fields
                .iter()
                .filter(|(name, _)| name.as_str() != ID_FIELD)
                .map(|(name, value)| (name.clone(), value.clone())),
        )
    }

    /// Builds an update that sets a single field.
    pub fn set_field(name: impl Into<String>, value: Value) -> Result<Self, UpdateError> {
        Self::from_assignments(std::iter::once((name.into(), value)))
    }

    fn from_assignments(
        assignments: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<Self, UpdateError> {
        let assignments: Vec<(String, Value)> = assignments.into_iter().collect();

        if assignments.is_empty() {
            return Err(UpdateError::Empty);
        }
        if let Some((name, _)) = assignments.iter().find(|(name, _)| name.is_empty()) {
            return Err(UpdateError::InvalidFieldName(name.clone()));
        }

        let mut clauses = Vec::with_capacity(assignments.len());
        let mut names = BTreeMap::new();
        let mut values = BTreeMap::new();

        for (index, (name, value)) in assignments.iter().enumerate() {
            let name_key = name_placeholder(index);
            let value_key = value_placeholder(index);

            clauses.push(format!("{name_key} = {value_key}"));
            names.insert(name_key, name.clone());
            values.insert(value_key, value.clone());
        }

        Ok(Self {
            expression: format!("SET {}", clauses.join(", ")),
            names,
            values,
            assignments,
        })
    }

    /// The expression text, e.g. `SET #attr0 = :value0, #attr1 = :value1`.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Attribute name placeholders.
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Attribute value placeholders.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Field names and values in assignment order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.assignments
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Applies the assignments to a document, replacing existing fields.
    pub fn apply_to(&self, document: &mut Map<String, Value>) {
        for (name, value) in self.assignments() {
            document.insert(name.to_string(), value.clone());
        }
    }
}
