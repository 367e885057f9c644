//! Two-shape result envelope returned by every backend command.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

/// Success or error wrapper, tagged by `status` on the wire.
///
/// ```json
/// {"status": "ok", "data": 42}
/// {"status": "error", "error": "NotFound"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    /// The command succeeded.
    Ok {
        /// Command payload.
        data: T,
    },
    /// The command failed.
    Error {
        /// Classified failure reason.
        error: ApiError,
    },
}

impl<T> Envelope<T> {
    /// Build a success envelope.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self::Ok { data }
    }

    /// Build an error envelope.
    #[must_use]
    pub fn error(error: ApiError) -> Self {
        Self::Error { error }
    }

    /// Whether this envelope carries data.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Transform the payload, leaving errors untouched.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Self::Ok { data } => Envelope::Ok { data: f(data) },
            Self::Error { error } => Envelope::Error { error },
        }
    }

    /// Convert into a plain `Result` without building a display message.
    ///
    /// # Errors
    ///
    /// Returns the carried [`ApiError`] for error envelopes.
    pub fn into_result(self) -> std::result::Result<T, ApiError> {
        match self {
            Self::Ok { data } => Ok(data),
            Self::Error { error } => Err(error),
        }
    }
}

impl<T> From<std::result::Result<T, ApiError>> for Envelope<T> {
    fn from(result: std::result::Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Ok { data },
            Err(error) => Self::Error { error },
        }
    }
}

impl Envelope<Value> {
    /// Interpret an arbitrary JSON value as an envelope.
    ///
    /// A missing `data` field on an `ok` envelope reads as `null`. Values
    /// without a recognised `status` are not rejected: the whole value is
    /// kept as [`ApiError::Unknown`].
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let status = value.get("status").and_then(Value::as_str);
        match status {
            Some("ok") => Self::Ok {
                data: value.get("data").cloned().unwrap_or(Value::Null),
            },
            Some("error") => Self::Error {
                error: ApiError::from_value(value.get("error").cloned().unwrap_or(Value::Null)),
            },
            _ => Self::Error {
                error: ApiError::Unknown(value),
            },
        }
    }

    /// Decode the payload into `T`.
    ///
    /// A payload that does not match `T` becomes [`ApiError::Unknown`]
    /// holding the raw payload.
    #[must_use]
    pub fn decode<T: DeserializeOwned>(self) -> Envelope<T> {
        match self {
            Self::Ok { data } => match T::deserialize(&data) {
                Ok(decoded) => Envelope::Ok { data: decoded },
                Err(_) => Envelope::Error {
                    error: ApiError::Unknown(data),
                },
            },
            Self::Error { error } => Envelope::Error { error },
        }
    }
}
