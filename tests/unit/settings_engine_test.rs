//! Unit tests for the settings engine: file loading, environment overrides
//! and validation.

use std::fs;

use reposcope::services::settings_engine::{SettingsEngine, ENV_GITHUB_TOKEN, ENV_GITHUB_API_BASE};
use reposcope::types::errors::SettingsError;
use reposcope::types::settings::Settings;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let engine = SettingsEngine::new(Some(dir.path().join("absent.json")));

    let settings = engine.load(no_env).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.github.api_base, "https://api.github.com");
    assert_eq!(settings.guide.max_issues, 5);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"charts": {"width": 800}, "guide": {"max_issues": 2}}"#).unwrap();

    let settings = SettingsEngine::new(Some(path)).load(no_env).unwrap();
    assert_eq!(settings.charts.width, 800);
    assert_eq!(settings.charts.height, 400);
    assert_eq!(settings.charts.base_url, "https://quickchart.io/chart");
    assert_eq!(settings.guide.max_issues, 2);
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let result = SettingsEngine::new(Some(path)).load(no_env);
    assert!(matches!(result, Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_env_overrides_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"github": {"token": "from-file"}}"#).unwrap();

    let settings = SettingsEngine::new(Some(path))
        .load(|key| match key {
            ENV_GITHUB_TOKEN => Some("from-env".to_string()),
            ENV_GITHUB_API_BASE => Some("http://127.0.0.1:9999".to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!(settings.github.token.as_deref(), Some("from-env"));
    assert_eq!(settings.github.api_base, "http://127.0.0.1:9999");
}

#[test]
fn test_zero_max_issues_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"guide": {"max_issues": 0}}"#).unwrap();

    let result = SettingsEngine::new(Some(path)).load(no_env);
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
}

#[test]
fn test_non_http_api_base_is_rejected() {
    let dir = TempDir::new().unwrap();
    let engine = SettingsEngine::new(Some(dir.path().join("settings.json")));

    let result = engine.load(|key| (key == ENV_GITHUB_API_BASE).then(|| "api.github.com".to_string()));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
}
