//! Contract tests for backend command names and argument encoding.

use std::sync::Arc;

use serde_json::json;
use worth_client::bridge::Bridge;
use worth_client::commands::{
    default_manifest, AccountBalanceOverTime, AccountSnapshotsList, AccountsGet, AccountsList,
    DashboardBalanceOverTime, DashboardGet, COMMAND_NAMES, DEFAULT_SURFACE,
};
use worth_client::models::BalanceOverTimePeriod;
use worth_client::surface::{CommandTable, Member};
use worth_client::Command;

#[test]
fn command_names_match_backend_handlers() {
    assert_eq!(AccountsList::NAME, "accounts_list");
    assert_eq!(AccountsGet::NAME, "accounts_get");
    assert_eq!(AccountSnapshotsList::NAME, "account_snapshots_list");
    assert_eq!(AccountBalanceOverTime::NAME, "account_balance_over_time");
    assert_eq!(DashboardGet::NAME, "dashboard_get");
    assert_eq!(DashboardBalanceOverTime::NAME, "dashboard_balance_over_time");
}

#[test]
fn command_names_are_unique() {
    let mut names = COMMAND_NAMES.to_vec();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), COMMAND_NAMES.len());
}

#[test]
fn arguments_are_camel_case() {
    let args = serde_json::to_value(AccountBalanceOverTime {
        account_id: 7,
        period: BalanceOverTimePeriod::P6M,
    })
    .unwrap();
    assert_eq!(args, json!({ "accountId": 7, "period": "6M" }));

    let args = serde_json::to_value(AccountsGet { account_id: 3 }).unwrap();
    assert_eq!(args, json!({ "accountId": 3 }));
}

#[test]
fn default_manifest_groups_commands_by_namespace() {
    assert_eq!(
        default_manifest(),
        json!({
            "accounts": {
                "list": { "command": "accounts_list" },
                "get": { "command": "accounts_get" },
                "snapshots": { "command": "account_snapshots_list" },
                "balanceOverTime": { "command": "account_balance_over_time" }
            },
            "dashboard": {
                "get": { "command": "dashboard_get" },
                "balanceOverTime": { "command": "dashboard_balance_over_time" }
            }
        })
    );
}

#[test]
fn default_surface_covers_every_command_once() {
    let mut routed: Vec<&str> = DEFAULT_SURFACE.iter().map(|(_, _, name)| *name).collect();
    routed.sort_unstable();
    let mut names = COMMAND_NAMES.to_vec();
    names.sort_unstable();
    assert_eq!(routed, names);
}

#[test]
fn default_manifest_builds_a_namespaced_table() {
    let bridge: Arc<dyn Bridge> = Arc::new(CommandTable::default());
    let table = CommandTable::from_manifest(&default_manifest(), &bridge).unwrap();

    assert_eq!(table.names().collect::<Vec<_>>(), ["accounts", "dashboard"]);
    for (namespace, member, _) in DEFAULT_SURFACE {
        let path = format!("{namespace}.{member}");
        assert!(
            matches!(table.get(&path), Some(Member::Command(_))),
            "missing {path}"
        );
    }
}
