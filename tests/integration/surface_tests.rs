//! Integration tests for `InvocationSurface` over in-process command tables.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use worth_client::surface::{CommandTable, InvocationSurface, SurfaceMember};
use worth_client::{ApiError, Envelope};

fn accounts_table() -> CommandTable {
    CommandTable::builder()
        .command("list", |_args| async { Envelope::ok(json!([{ "id": 1 }, { "id": 2 }])) })
        .command("get", |args: Value| async move {
            match args.get("accountId").and_then(Value::as_i64) {
                Some(1) => Envelope::ok(json!({ "id": 1 })),
                _ => Envelope::error(ApiError::NotFound),
            }
        })
        .build()
        .unwrap()
}

fn sample_table() -> CommandTable {
    CommandTable::builder()
        .command("foo", |_args| async { Envelope::ok(json!(42)) })
        .constant("bar", "baz")
        .command("echo", |args| async move { Envelope::ok(args) })
        .command("nothing", |_args| async { Envelope::ok(Value::Null) })
        .command("rejects", |_args| async {
            Envelope::error(ApiError::Validation("period must be one of 1M, 6M".into()))
        })
        .command("db_down", |_args| async { Envelope::error(ApiError::Db) })
        .namespace("accounts", accounts_table())
        .build()
        .unwrap()
}

#[tokio::test]
async fn command_resolves_to_unwrapped_payload() {
    let surface = InvocationSurface::wrap(sample_table());

    assert_eq!(surface.call("foo", json!({})).await.unwrap(), json!(42));
    assert_eq!(surface.constant("bar"), Some(&json!("baz")));
}

#[tokio::test]
async fn null_payload_is_passed_through() {
    let surface = InvocationSurface::wrap(sample_table());
    assert_eq!(surface.call("nothing", json!({})).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn arguments_reach_the_raw_command() {
    let surface = InvocationSurface::wrap(sample_table());
    let args = json!({ "accountId": 9, "period": "1Y" });
    assert_eq!(surface.call("echo", args.clone()).await.unwrap(), args);
}

#[tokio::test]
async fn error_envelopes_become_classified_errors() {
    let surface = InvocationSurface::wrap(sample_table());

    let err = surface.call("rejects", json!({})).await.unwrap_err();
    assert_eq!(err.message(), "Validation error: period must be one of 1M, 6M");
    assert_eq!(
        err.api_error(),
        &ApiError::Validation("period must be one of 1M, 6M".into())
    );

    let err = surface.call("db_down", json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "Database error");
}

#[tokio::test]
async fn namespaces_are_wrapped_recursively() {
    let surface = InvocationSurface::wrap(sample_table());

    let list = surface.call("accounts.list", json!({})).await.unwrap();
    assert_eq!(list, json!([{ "id": 1 }, { "id": 2 }]));

    let accounts = surface.namespace("accounts").unwrap();
    assert_eq!(
        accounts.call("get", json!({ "accountId": 1 })).await.unwrap(),
        json!({ "id": 1 })
    );
    let err = accounts
        .call("get", json!({ "accountId": 2 }))
        .await
        .unwrap_err();
    assert_eq!(err.api_error(), &ApiError::NotFound);
}

#[tokio::test]
async fn non_commands_are_not_callable() {
    let surface = InvocationSurface::wrap(sample_table());

    for path in ["bar", "accounts", "missing", "accounts.missing", ""] {
        let err = surface.call(path, json!({})).await.unwrap_err();
        assert_eq!(err.api_error(), &ApiError::NotFound, "path {path:?}");
    }
    assert!(surface.command("bar").is_none());
    assert!(surface.constant("foo").is_none());
    assert!(surface.namespace("foo").is_none());
}

#[tokio::test]
async fn members_keep_their_kind() {
    let surface = InvocationSurface::wrap(sample_table());

    assert_eq!(
        surface.names().collect::<Vec<_>>(),
        ["accounts", "bar", "db_down", "echo", "foo", "nothing", "rejects"]
    );
    assert!(matches!(surface.member("foo"), Some(SurfaceMember::Command(_))));
    assert!(matches!(
        surface.member("bar"),
        Some(SurfaceMember::Constant(v)) if v == &json!("baz")
    ));
    assert!(matches!(
        surface.member("accounts"),
        Some(SurfaceMember::Namespace(_))
    ));
    assert!(surface.member("missing").is_none());
    assert!(surface.contains("accounts.get"));
}

#[tokio::test]
async fn command_adapter_is_reusable() {
    let surface = InvocationSurface::wrap(sample_table());
    let foo = surface.command("foo").unwrap();

    assert_eq!(foo.call(json!({})).await.unwrap(), json!(42));
    assert_eq!(foo.call(json!({})).await.unwrap(), json!(42));
}

#[tokio::test]
async fn call_as_decodes_payload() {
    let surface = InvocationSurface::wrap(sample_table());

    let answer: u32 = surface.call_as("foo", json!({})).await.unwrap();
    assert_eq!(answer, 42);

    let err = surface
        .call_as::<String>("foo", json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.api_error(), &ApiError::Unknown(json!(42)));
    assert_eq!(err.message(), "Unknown error");
}

#[tokio::test]
async fn wrapping_twice_does_not_change_results() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let table = CommandTable::builder()
        .command("count", move |_args| {
            let counter = Arc::clone(&counter);
            async move { Envelope::ok(json!(counter.fetch_add(1, Ordering::SeqCst) + 1)) }
        })
        .command("fail", |_args| async { Envelope::error(ApiError::NotFound) })
        .constant("bar", "baz")
        .build()
        .unwrap();

    let once = InvocationSurface::wrap(table);
    let twice = InvocationSurface::wrap(once.clone());
    let thrice = InvocationSurface::wrap(twice.table().clone());

    assert_eq!(once.call("count", json!({})).await.unwrap(), json!(1));
    assert_eq!(twice.call("count", json!({})).await.unwrap(), json!(2));
    assert_eq!(thrice.call("count", json!({})).await.unwrap(), json!(3));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let once_err = once.call("fail", json!({})).await.unwrap_err();
    let twice_err = twice.call("fail", json!({})).await.unwrap_err();
    assert_eq!(once_err, twice_err);
    assert_eq!(twice.constant("bar"), Some(&json!("baz")));
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let table = CommandTable::builder()
        .command("slow", |_args| async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Envelope::ok(json!("slow"))
        })
        .command("fast_fail", |_args| async { Envelope::error(ApiError::Db) })
        .build()
        .unwrap();
    let surface = InvocationSurface::wrap(table);

    let (slow, fast) = tokio::join!(
        surface.call("slow", json!({})),
        surface.call("fast_fail", json!({}))
    );

    assert_eq!(slow.unwrap(), json!("slow"));
    assert_eq!(fast.unwrap_err().api_error(), &ApiError::Db);
}

#[tokio::test]
async fn dropped_call_leaves_surface_usable() {
    let surface = InvocationSurface::wrap(sample_table());

    let pending = surface.call("foo", json!({}));
    drop(pending);

    assert_eq!(surface.call("foo", json!({})).await.unwrap(), json!(42));
}
