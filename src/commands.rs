//! Typed catalogue of the backend commands.
//!
//! Each entry declares the command struct (its fields are the command
//! arguments, camelCase on the wire), the backend command name and the
//! success payload:
//!
//! ```rust,ignore
//! define_commands! {
//!     /// Fetch one account.
//!     AccountsGet { account_id: i64 } => "accounts_get" -> AccountDto;
//! }
//! ```
//!
//! The generated types work with [`Api::call`](crate::surface::Api::call)
//! without further registration.

use serde_json::{json, Map, Value};

use crate::models::{
    AccountBalanceSnapshotDto, AccountDto, BalanceOverTimePeriod, BalancePointDto,
    DashboardBalancePointDto, DashboardDto,
};
use crate::surface::Command;

/// Declare command structs and their [`Command`](crate::surface::Command)
/// implementations.
#[macro_export]
macro_rules! define_commands {
    (@struct $(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ::serde::Serialize)]
        pub struct $name;
    };
    (@struct $(#[$meta:meta])* $name:ident { $($(#[$fmeta:meta])* $field:ident : $ty:ty),* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $($(#[$fmeta])* pub $field: $ty),*
        }
    };
    ($(
        $(#[$meta:meta])*
        $name:ident $({ $($(#[$fmeta:meta])* $field:ident : $ty:ty),* $(,)? })?
            => $wire:literal -> $output:ty;
    )*) => {
        $(
            $crate::define_commands!(@struct $(#[$meta])* $name $({ $($(#[$fmeta])* $field : $ty),* })?);

            impl $crate::surface::Command for $name {
                const NAME: &'static str = $wire;
                type Output = $output;
            }
        )*
    };
}

define_commands! {
    /// List every account with its activity series.
    AccountsList => "accounts_list" -> Vec<AccountDto>;

    /// Fetch one account.
    AccountsGet {
        /// Account identifier.
        account_id: i64
    } => "accounts_get" -> AccountDto;

    /// List the recorded balance snapshots of an account.
    AccountSnapshotsList {
        /// Account identifier.
        account_id: i64
    } => "account_snapshots_list" -> Vec<AccountBalanceSnapshotDto>;

    /// Forward-filled daily balance of one account.
    AccountBalanceOverTime {
        /// Account identifier.
        account_id: i64,
        /// Chart window.
        period: BalanceOverTimePeriod,
    } => "account_balance_over_time" -> Vec<BalancePointDto>;

    /// Headline dashboard figures.
    DashboardGet => "dashboard_get" -> DashboardDto;

    /// Forward-filled daily total balance across all accounts.
    DashboardBalanceOverTime {
        /// Chart window.
        period: BalanceOverTimePeriod,
    } => "dashboard_balance_over_time" -> Vec<DashboardBalancePointDto>;
}

/// Backend names of every catalogued command.
pub const COMMAND_NAMES: [&str; 6] = [
    AccountsList::NAME,
    AccountsGet::NAME,
    AccountSnapshotsList::NAME,
    AccountBalanceOverTime::NAME,
    DashboardGet::NAME,
    DashboardBalanceOverTime::NAME,
];

/// Surface path of every catalogued command: `(namespace, member, backend name)`.
pub const DEFAULT_SURFACE: [(&str, &str, &str); 6] = [
    ("accounts", "list", AccountsList::NAME),
    ("accounts", "get", AccountsGet::NAME),
    ("accounts", "snapshots", AccountSnapshotsList::NAME),
    ("accounts", "balanceOverTime", AccountBalanceOverTime::NAME),
    ("dashboard", "get", DashboardGet::NAME),
    ("dashboard", "balanceOverTime", DashboardBalanceOverTime::NAME),
];

/// Manifest grouping the catalogued commands by namespace, laid out as in
/// [`DEFAULT_SURFACE`] (`accounts.list`, `dashboard.balanceOverTime`, ...).
///
/// Feed it to [`CommandTable::from_manifest`](crate::surface::CommandTable::from_manifest)
/// when no hand-written manifest is configured.
#[must_use]
pub fn default_manifest() -> Value {
    let mut root = Map::new();
    for (namespace, member, backend_name) in DEFAULT_SURFACE {
        if let Value::Object(members) = root
            .entry(namespace)
            .or_insert_with(|| Value::Object(Map::new()))
        {
            members.insert(member.to_owned(), json!({ "command": backend_name }));
        }
    }
    Value::Object(root)
}
