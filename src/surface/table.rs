//! Raw command table: member name to command, constant or namespace.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::api::{ApiError, Envelope};
use crate::bridge::{Bridge, PendingEnvelope};
use crate::{AppError, Result};

/// Raw command: JSON arguments in, envelope out.
pub type RawCommand = Arc<dyn Fn(Value) -> PendingEnvelope<'static> + Send + Sync>;

/// One entry of a [`CommandTable`].
#[derive(Clone)]
pub enum Member {
    /// Invokable backend command.
    Command(RawCommand),
    /// Plain value exposed as-is.
    Constant(Value),
    /// Nested table.
    Namespace(CommandTable),
}

impl Debug for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command(_) => f.write_str("Command(..)"),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Namespace(table) => f.debug_tuple("Namespace").field(table).finish(),
        }
    }
}

/// Immutable mapping of member names to [`Member`]s.
///
/// Cloning is cheap; all clones share the same members.
#[derive(Clone, Default)]
pub struct CommandTable {
    members: Arc<BTreeMap<String, Member>>,
}

impl Debug for CommandTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.members.iter()).finish()
    }
}

impl CommandTable {
    /// Start building a table.
    #[must_use]
    pub fn builder() -> CommandTableBuilder {
        CommandTableBuilder::default()
    }

    /// Build a bridge-backed table from a JSON manifest.
    ///
    /// Members are classified as follows:
    ///
    /// | Manifest value                  | Member                 |
    /// |---------------------------------|------------------------|
    /// | `{"command": "<backend name>"}` | [`Member::Command`]    |
    /// | any other object                | [`Member::Namespace`]  |
    /// | scalar or array                 | [`Member::Constant`]   |
    ///
    /// # Errors
    ///
    /// Returns `AppError::Surface` if the root is not an object, if a member
    /// name is not addressable, or if an object carries a `command` key but
    /// is not a well-formed command (non-string name or extra keys).
    pub fn from_manifest(manifest: &Value, bridge: &Arc<dyn Bridge>) -> Result<Self> {
        let Value::Object(root) = manifest else {
            return Err(AppError::Surface("manifest root must be an object".into()));
        };
        classify_namespace("", root, bridge)
    }

    /// Look up a member by name or dotted path (`"accounts.list"`).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Member> {
        let mut segments = path.split('.');
        let mut current = self.members.get(segments.next()?)?;
        for segment in segments {
            let Member::Namespace(table) = current else {
                return None;
            };
            current = table.members.get(segment)?;
        }
        Some(current)
    }

    /// Whether `path` resolves to any member.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Top-level member names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Top-level members, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(name, member)| (name.as_str(), member))
    }

    /// Number of top-level members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the table has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Bridge for CommandTable {
    fn invoke(&self, command: &str, args: Value) -> PendingEnvelope<'_> {
        match self.get(command) {
            Some(Member::Command(raw)) => raw(args),
            _ => Box::pin(std::future::ready(Envelope::error(ApiError::NotFound))),
        }
    }
}

/// Incremental [`CommandTable`] construction.
#[derive(Default)]
pub struct CommandTableBuilder {
    members: BTreeMap<String, Member>,
    error: Option<AppError>,
}

impl CommandTableBuilder {
    /// Register an async command.
    #[must_use]
    pub fn command<F, Fut>(self, name: impl Into<String>, command: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Envelope<Value>> + Send + 'static,
    {
        let raw: RawCommand =
            Arc::new(move |args: Value| -> PendingEnvelope<'static> { Box::pin(command(args)) });
        self.member(name, Member::Command(raw))
    }

    /// Register a plain value.
    #[must_use]
    pub fn constant(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(name, Member::Constant(value.into()))
    }

    /// Register a nested table.
    #[must_use]
    pub fn namespace(self, name: impl Into<String>, table: CommandTable) -> Self {
        self.member(name, Member::Namespace(table))
    }

    /// Register an already classified member.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
        let name = name.into();
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = check_member_name(&name) {
            self.error = Some(err);
        } else if self.members.contains_key(&name) {
            self.error = Some(AppError::Surface(format!("duplicate member '{name}'")));
        } else {
            self.members.insert(name, member);
        }
        self
    }

    /// Finish the table.
    ///
    /// # Errors
    ///
    /// Returns the first `AppError::Surface` recorded while registering
    /// members (empty, dotted or duplicate names).
    pub fn build(self) -> Result<CommandTable> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(CommandTable {
                members: Arc::new(self.members),
            }),
        }
    }
}

fn check_member_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('.') {
        return Err(AppError::Surface(format!(
            "member name '{name}' must be non-empty and contain no '.'"
        )));
    }
    Ok(())
}

fn classify_namespace(
    prefix: &str,
    members: &serde_json::Map<String, Value>,
    bridge: &Arc<dyn Bridge>,
) -> Result<CommandTable> {
    let mut builder = CommandTable::builder();
    for (name, value) in members {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        let member = classify_member(&path, value, bridge)?;
        builder = builder.member(name.clone(), member);
    }
    builder.build()
}

fn classify_member(path: &str, value: &Value, bridge: &Arc<dyn Bridge>) -> Result<Member> {
    let Value::Object(map) = value else {
        return Ok(Member::Constant(value.clone()));
    };

    let Some(command) = map.get("command") else {
        return classify_namespace(path, map, bridge).map(Member::Namespace);
    };

    match command {
        Value::String(backend_name) if map.len() == 1 => {
            Ok(Member::Command(bridged_command(backend_name, bridge)))
        }
        Value::String(_) => Err(AppError::Surface(format!(
            "member '{path}' mixes a command with other keys"
        ))),
        other => Err(AppError::Surface(format!(
            "member '{path}' is not callable: command name must be a string, got {other}"
        ))),
    }
}

fn bridged_command(backend_name: &str, bridge: &Arc<dyn Bridge>) -> RawCommand {
    let backend_name: Arc<str> = Arc::from(backend_name);
    let bridge = Arc::clone(bridge);
    Arc::new(move |args: Value| -> PendingEnvelope<'static> {
        let bridge = Arc::clone(&bridge);
        let backend_name = Arc::clone(&backend_name);
        Box::pin(async move { bridge.invoke(&backend_name, args).await })
    })
}
