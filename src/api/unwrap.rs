//! Envelope unwrapping and the classified command error.

use std::fmt::{Display, Formatter};
use std::future::Future;

use serde_json::Value;

use super::envelope::Envelope;
use super::error::ApiError;

/// Human-readable message for an [`ApiError`].
#[must_use]
pub fn format_error(error: &ApiError) -> String {
    error.to_string()
}

/// Classify a raw JSON error value, then format it.
#[must_use]
pub fn format_error_value(value: &Value) -> String {
    format_error(&ApiError::from_value(value.clone()))
}

/// Error returned when a backend command reports failure.
///
/// Keeps the structured [`ApiError`] for branching and a display message
/// computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCommandError {
    api_error: ApiError,
    message: String,
}

impl ApiCommandError {
    /// Wrap an [`ApiError`], deriving its display message.
    #[must_use]
    pub fn new(api_error: ApiError) -> Self {
        let message = format_error(&api_error);
        Self { api_error, message }
    }

    /// The structured error reported by the backend.
    #[must_use]
    pub fn api_error(&self) -> &ApiError {
        &self.api_error
    }

    /// Precomputed display message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consume the error, returning the structured reason.
    #[must_use]
    pub fn into_api_error(self) -> ApiError {
        self.api_error
    }
}

impl Display for ApiCommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiCommandError {}

impl From<ApiError> for ApiCommandError {
    fn from(api_error: ApiError) -> Self {
        Self::new(api_error)
    }
}

/// Extract the payload of an envelope.
///
/// The payload is returned as-is, without copying or transformation.
///
/// # Errors
///
/// Returns an [`ApiCommandError`] wrapping the carried [`ApiError`] for
/// error envelopes.
pub fn unwrap_envelope<T>(envelope: Envelope<T>) -> std::result::Result<T, ApiCommandError> {
    match envelope {
        Envelope::Ok { data } => Ok(data),
        Envelope::Error { error } => Err(ApiCommandError::new(error)),
    }
}

/// Await a pending envelope and unwrap it.
///
/// # Errors
///
/// Returns an [`ApiCommandError`] when the envelope reports failure.
pub async fn invoke<T, F>(pending: F) -> std::result::Result<T, ApiCommandError>
where
    F: Future<Output = Envelope<T>>,
{
    unwrap_envelope(pending.await)
}
