use std::time::Duration;

use serial_test::serial;
use worth_client::config::AUTH_TOKEN_ENV;
use worth_client::{AppError, ClientConfig};

fn sample_toml() -> &'static str {
    r#"
ipc_name = "worth-test"
request_timeout_seconds = 5
auth_token = "secret"
manifest = "commands.json"
"#
}

#[test]
fn parses_valid_config() {
    let config = ClientConfig::from_toml_str(sample_toml()).expect("config parses");

    assert_eq!(config.ipc_name, "worth-test");
    assert_eq!(config.request_timeout_seconds, 5);
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
    assert_eq!(config.auth_token.as_deref(), Some("secret"));
    assert_eq!(
        config.manifest.as_deref(),
        Some(std::path::Path::new("commands.json"))
    );
}

#[test]
fn empty_config_uses_defaults() {
    let config = ClientConfig::from_toml_str("").expect("empty config parses");
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.ipc_name, "worth");
    assert_eq!(config.request_timeout_seconds, 30);
    assert!(config.auth_token.is_none());
    assert!(config.manifest.is_none());
}

#[test]
fn rejects_zero_timeout() {
    let err = ClientConfig::from_toml_str("request_timeout_seconds = 0").unwrap_err();
    assert!(matches!(err, AppError::Config(msg) if msg.contains("request_timeout_seconds")));
}

#[test]
fn rejects_blank_ipc_name() {
    let err = ClientConfig::from_toml_str("ipc_name = \"  \"").unwrap_err();
    assert!(matches!(err, AppError::Config(msg) if msg.contains("ipc_name")));
}

#[test]
fn invalid_toml_is_config_error() {
    let err = ClientConfig::from_toml_str("ipc_name = ").unwrap_err();
    assert!(err.to_string().starts_with("config: invalid config"));
}

#[test]
fn wrong_field_type_is_config_error() {
    let err = ClientConfig::from_toml_str("request_timeout_seconds = \"soon\"").unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn loads_from_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("config.toml");
    std::fs::write(&path, sample_toml()).expect("write config");

    let config = ClientConfig::load_from_path(&path).expect("config loads");
    assert_eq!(config.ipc_name, "worth-test");
}

#[test]
fn missing_file_is_config_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let err = ClientConfig::load_from_path(temp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, AppError::Config(msg) if msg.starts_with("failed to read config")));
}

#[test]
#[serial]
fn env_token_fills_missing_auth_token() {
    std::env::set_var(AUTH_TOKEN_ENV, "from-env");
    let mut config = ClientConfig::default();
    config.apply_env_overrides();
    std::env::remove_var(AUTH_TOKEN_ENV);

    assert_eq!(config.auth_token.as_deref(), Some("from-env"));
}

#[test]
#[serial]
fn file_token_wins_over_env() {
    std::env::set_var(AUTH_TOKEN_ENV, "from-env");
    let mut config = ClientConfig::from_toml_str(sample_toml()).expect("config parses");
    config.apply_env_overrides();
    std::env::remove_var(AUTH_TOKEN_ENV);

    assert_eq!(config.auth_token.as_deref(), Some("secret"));
}

#[test]
#[serial]
fn empty_env_token_is_ignored() {
    std::env::set_var(AUTH_TOKEN_ENV, "");
    let mut config = ClientConfig::default();
    config.apply_env_overrides();
    std::env::remove_var(AUTH_TOKEN_ENV);

    assert!(config.auth_token.is_none());
}
