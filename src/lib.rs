#![forbid(unsafe_code)]

//! Typed command-invocation client for the Worth backend, plus account-type
//! theming.

pub mod api;
pub mod bridge;
pub mod commands;
pub mod config;
pub mod errors;
pub mod models;
pub mod surface;
pub mod theme;

pub use api::{ApiCommandError, ApiError, CommandResult, Envelope};
pub use bridge::{Bridge, IpcBridge};
pub use config::ClientConfig;
pub use errors::{AppError, Result};
pub use surface::{Api, Command, CommandTable, InvocationSurface};
