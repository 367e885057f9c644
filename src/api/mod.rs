//! Result envelope, error taxonomy and the unwrapping helpers that turn
//! envelopes into plain values or [`ApiCommandError`]s.

pub mod envelope;
pub mod error;
pub mod unwrap;

pub use envelope::Envelope;
pub use error::ApiError;
pub use unwrap::{format_error, format_error_value, invoke, unwrap_envelope, ApiCommandError};

/// Result of an unwrapped backend command.
pub type CommandResult<T> = std::result::Result<T, ApiCommandError>;
