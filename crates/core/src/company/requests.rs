//! Request payloads for company operations.
//!
//! Bodies arrive as free-form JSON; these types pick out the parts the
//! handlers act on. Pure data, no I/O.

use serde_json::{Map, Value};

use super::error::PayloadError;
use super::types::{CompanyId, CLIENT_STATUS_FIELD, ID_FIELD};

/// What a `PUT /companies/{id}` body asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertRequest {
    /// The body names an existing id: set every other field on it.
    Update {
        id: CompanyId,
        fields: Map<String, Value>,
    },
    /// The body has no usable id: store it as a new company.
    Create { fields: Map<String, Value> },
}

impl UpsertRequest {
    /// Classifies a request body.
    ///
    /// A non-zero integer `id` (or numeric string) selects an update. A
    /// missing, zero or non-integer `id` selects a create. In both cases the
    /// `id` field is stripped from the fields.
    pub fn from_body(body: Value) -> Result<Self, PayloadError> {
        let Value::Object(mut fields) = body else {
            return Err(PayloadError::NotAnObject);
        };

        let id = fields.remove(ID_FIELD).as_ref().and_then(CompanyId::from_json);

        Ok(match id {
            Some(id) => Self::Update { id, fields },
            None => Self::Create { fields },
        })
    }
}

/// A `PUT /companies/{id}/status` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientStatusRequest {
    pub client_status: bool,
}

impl ClientStatusRequest {
    /// Reads `clientStatus` from a request body. It must be a boolean.
    pub fn from_body(body: &Value) -> Result<Self, PayloadError> {
        let fields = body.as_object().ok_or(PayloadError::NotAnObject)?;

        match fields.get(CLIENT_STATUS_FIELD) {
            None | Some(Value::Null) => Err(PayloadError::MissingField(CLIENT_STATUS_FIELD)),
            Some(Value::Bool(client_status)) => Ok(Self {
                client_status: *client_status,
            }),
            Some(_) => Err(PayloadError::InvalidField {
                field: CLIENT_STATUS_FIELD,
                expected: "boolean",
            }),
        }
    }
}
