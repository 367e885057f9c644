//! Local-socket bridge to the backend process.
//!
//! Opens one connection per call on a named pipe (Windows) or Unix domain
//! socket (Linux/macOS) through the `interprocess` crate.
//!
//! ## Protocol
//!
//! Request (one JSON object per line):
//! ```json
//! {"command": "accounts_get", "args": {"accountId": 7}}
//! ```
//!
//! `auth_token` is added when configured.
//!
//! Response (one JSON object per line):
//! ```json
//! {"status": "ok", "data": { ... }}
//! {"status": "error", "error": "NotFound"}
//! ```

use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use interprocess::local_socket::tokio::{prelude::*, Stream};
use interprocess::local_socket::{GenericNamespaced, ToNsName};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio_util::codec::{Encoder, FramedRead};
use tracing::{debug, debug_span, warn, Instrument};

use super::codec::{BridgeCodec, BridgeRequest};
use super::{transport_failure, Bridge, PendingEnvelope};
use crate::api::Envelope;
use crate::config::ClientConfig;
use crate::{AppError, Result};

/// [`Bridge`] that forwards each call to the backend over a local socket.
#[derive(Debug, Clone)]
pub struct IpcBridge {
    ipc_name: String,
    auth_token: Option<String>,
    timeout: Duration,
}

impl IpcBridge {
    /// Create a bridge for the socket `ipc_name` with a 30 second timeout.
    #[must_use]
    pub fn new(ipc_name: impl Into<String>) -> Self {
        Self {
            ipc_name: ipc_name.into(),
            auth_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Create a bridge from client configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            ipc_name: config.ipc_name.clone(),
            auth_token: config.auth_token.clone(),
            timeout: config.request_timeout(),
        }
    }

    /// Attach a shared-secret token to every request.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Override the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Socket name this bridge connects to.
    #[must_use]
    pub fn ipc_name(&self) -> &str {
        &self.ipc_name
    }

    /// Send one request and read back its envelope.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Ipc` if the socket name is invalid, the connection
    /// fails, the peer closes before answering, or the answer is not JSON or
    /// exceeds the response size cap. Returns `AppError::Io` on write
    /// failures.
    pub async fn request(&self, command: &str, args: &Value) -> Result<Envelope<Value>> {
        let name = self
            .ipc_name
            .as_str()
            .to_ns_name::<GenericNamespaced>()
            .map_err(|err| {
                AppError::Ipc(format!("invalid ipc socket name '{}': {err}", self.ipc_name))
            })?;

        let stream = Stream::connect(name).await.map_err(|err| {
            AppError::Ipc(format!("failed to connect to '{}': {err}", self.ipc_name))
        })?;
        let (reader, mut writer) = stream.split();

        let request = BridgeRequest {
            command,
            args,
            auth_token: self.auth_token.as_deref(),
        };
        let mut codec = BridgeCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(&request, &mut buf)?;
        writer.write_all(&buf).await?;
        writer.flush().await?;

        let mut responses = FramedRead::new(reader, codec);
        responses.next().await.unwrap_or_else(|| {
            Err(AppError::Ipc(format!(
                "connection closed before '{command}' responded"
            )))
        })
    }
}

impl Bridge for IpcBridge {
    fn invoke(&self, command: &str, args: Value) -> PendingEnvelope<'_> {
        let command = command.to_owned();
        Box::pin(async move {
            let span = debug_span!("bridge_call", ipc_name = %self.ipc_name, command = %command);
            async move {
                match tokio::time::timeout(self.timeout, self.request(&command, &args)).await {
                    Ok(Ok(envelope)) => {
                        debug!(ok = envelope.is_ok(), "bridge call completed");
                        envelope
                    }
                    Ok(Err(err)) => {
                        warn!(%err, "bridge call failed");
                        transport_failure(err.to_string())
                    }
                    Err(_) => {
                        let secs = self.timeout.as_secs_f64();
                        warn!(timeout_secs = secs, "bridge call timed out");
                        transport_failure(format!("timed out after {secs}s"))
                    }
                }
            }
            .instrument(span)
            .await
        })
    }
}
