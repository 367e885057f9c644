//! Infrastructure error types shared across the client.
//!
//! Backend command failures are not represented here; they travel as
//! [`crate::api::ApiCommandError`]. `AppError` covers everything around the
//! invocation layer: configuration, manifest classification and transport.

use std::fmt::{Display, Formatter};

/// Shared client result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Client error enumeration covering infrastructure failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// IPC connection or framing failure.
    Ipc(String),
    /// File-system or I/O operation failure.
    Io(String),
    /// A command table member could not be classified.
    Surface(String),
    /// JSON encoding or decoding failure.
    Serialization(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Ipc(msg) => write!(f, "ipc: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Surface(msg) => write!(f, "surface: {msg}"),
            Self::Serialization(msg) => write!(f, "serialization: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
