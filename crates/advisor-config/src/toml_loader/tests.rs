//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::LogLevel;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_advisor_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, advisor_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "https://advisor.example.com/api"

[logging]
level = "DEBUG"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "https://advisor.example.com/api");
    assert_eq!(config.logging.level, LogLevel::Debug);
    // Defaults preserved
    assert_eq!(config.api.auth_scheme, "Token");
    assert_eq!(config.api.connect_timeout_secs, 10);
    assert_eq!(config.chat.title_preview_chars, 30);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, advisor_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_keeps_parsed_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
connect_timeout_secs = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.connect_timeout_secs, 0);
}

#[test]
fn request_timeout_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nrequest_timeout_secs = 90\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.request_timeout_secs, Some(90));
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("advisor").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:8000/api");
    assert_eq!(config.api.request_timeout_secs, None);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::AdvisorConfig;

    let config: AdvisorConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config.auth.token_env, "ADVISOR_TOKEN");
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("advisor"));
        assert!(path_str.ends_with("config.toml"));
    }
}
