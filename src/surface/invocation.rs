//! Unwrapped view over a [`CommandTable`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::table::{CommandTable, Member, RawCommand};
use crate::api::{invoke, ApiCommandError, ApiError, CommandResult};

/// Command table whose commands resolve to plain values.
///
/// The surface holds only the raw table and wraps each command when it is
/// called, so wrapping a surface again never unwraps twice.
#[derive(Debug, Clone, Default)]
pub struct InvocationSurface {
    table: CommandTable,
}

/// Adapter for a single command: `args -> invoke(raw(args))`.
#[derive(Clone)]
pub struct SurfaceCommand {
    raw: RawCommand,
}

/// Borrowed view of a surface member.
#[derive(Debug, Clone)]
pub enum SurfaceMember<'a> {
    /// Unwrapping adapter for a backend command.
    Command(SurfaceCommand),
    /// Constant, passed through unchanged.
    Constant(&'a Value),
    /// Nested surface.
    Namespace(InvocationSurface),
}

impl std::fmt::Debug for SurfaceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SurfaceCommand(..)")
    }
}

impl SurfaceCommand {
    /// Call the command and unwrap its envelope.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiCommandError`] built from an error envelope.
    pub async fn call(&self, args: Value) -> CommandResult<Value> {
        invoke((self.raw)(args)).await
    }

    /// Call the command and decode its payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiCommandError`] built from an error envelope, or an
    /// [`ApiError::Unknown`] error when the payload does not decode.
    pub async fn call_as<T: DeserializeOwned>(&self, args: Value) -> CommandResult<T> {
        let raw = (self.raw)(args);
        invoke(async move { raw.await.decode::<T>() }).await
    }
}

impl InvocationSurface {
    /// Wrap a table. Accepts another surface too; the result behaves the
    /// same as the original.
    #[must_use]
    pub fn wrap(table: impl Into<CommandTable>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// The raw table behind this surface.
    #[must_use]
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Resolve a member by name or dotted path.
    #[must_use]
    pub fn member(&self, path: &str) -> Option<SurfaceMember<'_>> {
        Some(match self.table.get(path)? {
            Member::Command(raw) => SurfaceMember::Command(SurfaceCommand {
                raw: raw.clone(),
            }),
            Member::Constant(value) => SurfaceMember::Constant(value),
            Member::Namespace(table) => SurfaceMember::Namespace(Self::wrap(table.clone())),
        })
    }

    /// Unwrapping adapter for the command at `path`.
    #[must_use]
    pub fn command(&self, path: &str) -> Option<SurfaceCommand> {
        match self.table.get(path)? {
            Member::Command(raw) => Some(SurfaceCommand { raw: raw.clone() }),
            _ => None,
        }
    }

    /// Constant at `path`, unchanged.
    #[must_use]
    pub fn constant(&self, path: &str) -> Option<&Value> {
        match self.table.get(path)? {
            Member::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// Nested surface at `path`.
    #[must_use]
    pub fn namespace(&self, path: &str) -> Option<Self> {
        match self.table.get(path)? {
            Member::Namespace(table) => Some(Self::wrap(table.clone())),
            _ => None,
        }
    }

    /// Call the command at `path` and unwrap its envelope.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiCommandError`] built from an error envelope, or one
    /// carrying [`ApiError::NotFound`] when `path` is not a command.
    pub async fn call(&self, path: &str, args: Value) -> CommandResult<Value> {
        self.command(path).ok_or_else(not_a_command)?.call(args).await
    }

    /// Call the command at `path` and decode its payload into `T`.
    ///
    /// # Errors
    ///
    /// As [`InvocationSurface::call`], plus [`ApiError::Unknown`] when the
    /// payload does not decode.
    pub async fn call_as<T: DeserializeOwned>(&self, path: &str, args: Value) -> CommandResult<T> {
        self.command(path)
            .ok_or_else(not_a_command)?
            .call_as(args)
            .await
    }

    /// Whether `path` resolves to any member.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.table.contains(path)
    }

    /// Top-level member names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.names()
    }
}

impl From<CommandTable> for InvocationSurface {
    fn from(table: CommandTable) -> Self {
        Self::wrap(table)
    }
}

impl From<InvocationSurface> for CommandTable {
    fn from(surface: InvocationSurface) -> Self {
        surface.table
    }
}

impl From<&InvocationSurface> for CommandTable {
    fn from(surface: &InvocationSurface) -> Self {
        surface.table.clone()
    }
}

fn not_a_command() -> ApiCommandError {
    ApiCommandError::new(ApiError::NotFound)
}
