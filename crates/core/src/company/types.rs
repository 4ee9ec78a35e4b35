use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the primary key attribute.
pub const ID_FIELD: &str = "id";

/// Name of the attribute that marks an active client.
pub const CLIENT_STATUS_FIELD: &str = "clientStatus";

/// Range for generated company ids (always six digits).
const GENERATED_ID_RANGE: std::ops::RangeInclusive<i64> = 100_000..=999_999;

/// Numeric primary key of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub i64);

impl CompanyId {
    /// Generates a random six-digit id.
    ///
    /// No uniqueness check is made; a collision overwrites the existing record.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generates a random six-digit id from the given RNG.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(GENERATED_ID_RANGE))
    }

    /// Reads an id out of a JSON value.
    ///
    /// Accepts any non-zero integer, as a number or a numeric string. Zero and
    /// fractional values yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        let id = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<CompanyId>().ok().map(|id| id.0),
            _ => None,
        }?;

        (id != 0).then_some(Self(id))
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CompanyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for CompanyId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A company record.
///
/// Apart from `id`, the record is schema-less: every other field is kept
/// as-is and serialized next to `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Company {
    /// Creates a company with no attributes.
    pub fn new(id: CompanyId) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Creates a company from a set of fields. Any `id` field is dropped.
    pub fn from_fields(id: CompanyId, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self {
            id,
            attributes: fields,
        }
    }

    /// Sets an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns true only when `clientStatus` is the boolean `true`.
    pub fn is_active_client(&self) -> bool {
        matches!(self.attributes.get(CLIENT_STATUS_FIELD), Some(Value::Bool(true)))
    }
}
