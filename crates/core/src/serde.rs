//! Serde helper functions for query string deserialization.
//!
//! Query parameters are parsed leniently: a value that is not a number is
//! treated as absent instead of rejecting the whole request.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional integer from a query string, treating empty or
/// non-numeric values as None.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| parse_lenient_i64(&s)))
}

/// Parse an integer, accepting surrounding whitespace and whole-valued
/// decimals such as `"2.0"`.
fn parse_lenient_i64(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_lenient_i64")]
        page: Option<i64>,
    }

    fn parse(json: &str) -> Option<i64> {
        serde_json::from_str::<Query>(json).unwrap().page
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(parse(r#"{"page": "3"}"#), Some(3));
        assert_eq!(parse(r#"{"page": " 7 "}"#), Some(7));
        assert_eq!(parse(r#"{"page": "2.0"}"#), Some(2));
        assert_eq!(parse(r#"{"page": "-4"}"#), Some(-4));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse(r#"{"page": "abc"}"#), None);
        assert_eq!(parse(r#"{"page": ""}"#), None);
        assert_eq!(parse(r#"{"page": "1.5"}"#), None);
        assert_eq!(parse(r#"{"page": "NaN"}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }
}
