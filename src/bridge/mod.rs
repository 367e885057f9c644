//! Raw command transport.
//!
//! A [`Bridge`] executes one backend command by name and yields its
//! [`Envelope`]. It is the only seam where transport happens; everything
//! above it (unwrapping, surfaces) is transport-agnostic.

pub mod codec;
pub mod ipc;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::api::{ApiError, Envelope};

pub use ipc::IpcBridge;

/// Boxed future resolving to a raw envelope.
pub type PendingEnvelope<'a> = Pin<Box<dyn Future<Output = Envelope<Value>> + Send + 'a>>;

/// Executes backend commands and returns their envelopes untouched.
///
/// Implementations never fail outside the envelope: transport problems are
/// reported as [`ApiError::Unknown`] error envelopes (see
/// [`transport_failure`]).
pub trait Bridge: Send + Sync {
    /// Invoke `command` with JSON `args`.
    fn invoke(&self, command: &str, args: Value) -> PendingEnvelope<'_>;
}

impl<B: Bridge + ?Sized> Bridge for std::sync::Arc<B> {
    fn invoke(&self, command: &str, args: Value) -> PendingEnvelope<'_> {
        (**self).invoke(command, args)
    }
}

/// Error envelope describing a transport failure.
#[must_use]
pub fn transport_failure(description: impl Into<String>) -> Envelope<Value> {
    Envelope::error(ApiError::Unknown(serde_json::json!({
        "transport": description.into(),
    })))
}
