//! Error taxonomy carried inside error envelopes.
//!
//! The backend encodes its errors as externally tagged values:
//!
//! ```json
//! "Db"
//! "NotFound"
//! {"Validation": "unknown account type name in DB: bond"}
//! ```
//!
//! Anything else decodes to [`ApiError::Unknown`], so decoding never fails.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Structured error reported by a backend command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Opaque persistence failure.
    Db,
    /// The requested entity does not exist.
    NotFound,
    /// Input or stored data failed validation.
    Validation(String),
    /// Any value that matches none of the known shapes, kept verbatim.
    Unknown(Value),
}

impl ApiError {
    /// Classify a raw JSON value. Total: unrecognised shapes become
    /// [`ApiError::Unknown`].
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(ref tag) if tag == "Db" => Self::Db,
            Value::String(ref tag) if tag == "NotFound" => Self::NotFound,
            Value::Object(ref map) => match map.get("Validation") {
                Some(Value::String(message)) => Self::Validation(message.clone()),
                _ => Self::Unknown(value),
            },
            other => Self::Unknown(other),
        }
    }

    /// Wire representation of this error.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Db => Value::String("Db".to_owned()),
            Self::NotFound => Value::String("NotFound".to_owned()),
            Self::Validation(message) => serde_json::json!({ "Validation": message }),
            Self::Unknown(raw) => raw.clone(),
        }
    }

    /// Short variant name, used as a structured log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Db => "db",
            Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db => f.write_str("Database error"),
            Self::NotFound => f.write_str("Not found"),
            Self::Validation(message) => write!(f, "Validation error: {message}"),
            Self::Unknown(_) => f.write_str("Unknown error"),
        }
    }
}

impl std::error::Error for ApiError {}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ApiError {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
