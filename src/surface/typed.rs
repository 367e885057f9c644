//! Statically typed invocation surface.
//!
//! A backend command is described once by a type implementing [`Command`];
//! its argument struct is the command value itself and its success payload
//! is [`Command::Output`]. [`Api::call`] maps `Envelope<Output>` to
//! `Result<Output, ApiCommandError>` for every such type, so new commands
//! need no change here.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::{invoke, ApiError, CommandResult, Envelope};
use crate::bridge::Bridge;

/// Typed description of one backend command.
pub trait Command: Serialize + Send + Sync {
    /// Backend command name.
    const NAME: &'static str;
    /// Success payload.
    type Output: DeserializeOwned + Send;
}

/// Typed client over any [`Bridge`].
#[derive(Debug, Clone)]
pub struct Api<B> {
    bridge: B,
}

impl<B: Bridge> Api<B> {
    /// Create a client over `bridge`.
    #[must_use]
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    /// The underlying bridge.
    #[must_use]
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Call `command` and return its envelope, payload already decoded.
    pub async fn call_raw<C: Command>(&self, command: &C) -> Envelope<C::Output> {
        match command_args(command) {
            Ok(args) => self.bridge.invoke(C::NAME, args).await.decode(),
            Err(error) => Envelope::error(error),
        }
    }

    /// Call `command` and unwrap its envelope.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiCommandError`](crate::api::ApiCommandError) built
    /// from an error envelope.
    pub async fn call<C: Command>(&self, command: &C) -> CommandResult<C::Output> {
        invoke(self.call_raw(command)).await
    }
}

/// Serialise command arguments; unit commands become an empty object.
fn command_args<C: Command>(command: &C) -> std::result::Result<Value, ApiError> {
    match serde_json::to_value(command) {
        Ok(Value::Null) => Ok(Value::Object(serde_json::Map::new())),
        Ok(args) => Ok(args),
        Err(err) => Err(ApiError::Unknown(serde_json::json!({
            "arguments": format!("{}: {err}", C::NAME),
        }))),
    }
}
