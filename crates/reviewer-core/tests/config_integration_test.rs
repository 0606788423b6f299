//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use reviewer_core::config::{
    ApiKey, CliConfigOverrides, ConfigSource, ForwarderConfig, LayeredConfig, API_KEY_ENV,
};
use reviewer_core::{ReviewerError, SYSTEM_INSTRUCTION};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};

fn clear_env() {
    env::remove_var("REVIEWER_MODEL");
    env::remove_var("REVIEWER_BASE_URL");
    env::remove_var("REVIEWER_TIMEOUT_SECS");
    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("REVIEWER_MODEL", "gemini-env-model");
    env::set_var("REVIEWER_TIMEOUT_SECS", "12");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
model = "gemini-file-model"
base_url = "http://file.example"
timeout_secs = 60
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.model.value, "gemini-env-model");
    assert_eq!(config.model.source, ConfigSource::Environment);
    assert_eq!(config.timeout_secs.value, Some(12));
    assert_eq!(config.timeout_secs.source, ConfigSource::Environment);
    // Not set in the environment, so the file wins
    assert_eq!(config.base_url.value, "http://file.example");
    assert_eq!(config.base_url.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_timeout_is_ignored() {
    clear_env();
    env::set_var("REVIEWER_TIMEOUT_SECS", "forever");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.timeout_secs.value, None);
    assert_eq!(config.timeout_secs.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_all() {
    clear_env();
    env::set_var("REVIEWER_MODEL", "gemini-env-model");

    let mut config = LayeredConfig::with_defaults().load_from_env();

    config.update_from_cli(CliConfigOverrides {
        model: Some("gemini-cli-model".to_string()),
        base_url: Some("http://127.0.0.1:4010".to_string()),
        ..Default::default()
    });

    assert_eq!(config.model.value, "gemini-cli-model");
    assert_eq!(config.model.source, ConfigSource::Cli);
    assert_eq!(config.base_url.value, "http://127.0.0.1:4010");
    assert_eq!(config.base_url.source, ConfigSource::Cli);

    assert!(ConfigSource::Cli.precedence() > ConfigSource::Environment.precedence());
    assert!(ConfigSource::Environment.precedence() > ConfigSource::File.precedence());
    assert!(ConfigSource::File.precedence() > ConfigSource::Default.precedence());

    clear_env();
}

#[test]
#[serial]
fn test_missing_api_key_fails_before_any_call() {
    clear_env();

    let err = ForwarderConfig::from_env().unwrap_err();

    assert!(err.is_configuration());
    assert!(matches!(err, ReviewerError::ConfigMissing { ref key } if key == API_KEY_ENV));
}

#[test]
#[serial]
fn test_blank_api_key_is_treated_as_missing() {
    clear_env();
    env::set_var(API_KEY_ENV, "   ");

    let err = ForwarderConfig::from_env().unwrap_err();
    assert!(matches!(err, ReviewerError::ConfigMissing { .. }));

    clear_env();
}

#[test]
#[serial]
fn test_forwarder_config_from_env() {
    clear_env();
    env::set_var(API_KEY_ENV, "test-key");
    env::set_var("REVIEWER_TIMEOUT_SECS", "7");

    let config = ForwarderConfig::from_env().unwrap();

    assert_eq!(config.api_key, ApiKey::new("test-key").unwrap());
    assert_eq!(config.model, "gemini-2.5-flash");
    assert_eq!(config.system_instruction, SYSTEM_INSTRUCTION);
    assert_eq!(config.timeout, Some(Duration::from_secs(7)));

    clear_env();
}

#[test]
fn test_instruction_file_resolves_relative_to_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("persona.md"), "You review Rust code only.").unwrap();
    let config_path = dir.path().join("reviewer.toml");
    fs::write(&config_path, "system_instruction_file = \"persona.md\"\n").unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(&config_path).unwrap();

    assert_eq!(config.system_instruction.value, "You review Rust code only.");
    assert_eq!(config.system_instruction.source, ConfigSource::File);

    let (shown, _) = &config.to_inspection_map()["system_instruction"];
    assert!(shown.starts_with("custom"));
}

#[test]
fn test_missing_instruction_file_is_invalid() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("reviewer.toml");
    fs::write(&config_path, "system_instruction_file = \"absent.md\"\n").unwrap();

    let err = LayeredConfig::with_defaults().load_from_file(&config_path).unwrap_err();

    assert!(matches!(
        err,
        ReviewerError::ConfigInvalid { ref key, .. } if key == "system_instruction_file"
    ));
}

#[test]
fn test_malformed_toml_is_invalid() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "model = ").unwrap();

    let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
    assert!(err.is_configuration());
}
