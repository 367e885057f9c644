//! Invocation surfaces: every backend command exposed as an async function
//! returning its unwrapped payload.
//!
//! - [`InvocationSurface`] wraps a dynamic [`CommandTable`] of commands,
//!   constants and namespaces.
//! - [`Api`] is the statically typed counterpart keyed by [`Command`]
//!   implementors.

pub mod invocation;
pub mod table;
pub mod typed;

pub use invocation::{InvocationSurface, SurfaceCommand, SurfaceMember};
pub use table::{CommandTable, CommandTableBuilder, Member, RawCommand};
pub use typed::{Api, Command};
