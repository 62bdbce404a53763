// reposcope Settings Engine
// Loads settings from a JSON file and layers environment overrides on top.
// The environment is read through an injected lookup so callers and tests
// decide where values come from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::Settings;

pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_GITHUB_API_BASE: &str = "GITHUB_API_BASE";
pub const ENV_CHART_BASE: &str = "REPOSCOPE_CHART_BASE";
pub const ENV_AI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_AI_ENDPOINT: &str = "REPOSCOPE_AI_ENDPOINT";
pub const ENV_AI_MODEL: &str = "REPOSCOPE_AI_MODEL";

/// Settings loader bound to one config file path.
pub struct SettingsEngine {
    config_path: PathBuf,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path =
            path_override.unwrap_or_else(|| platform::get_config_dir().join("settings.json"));
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    pub fn load_file(&self) -> Result<Settings, SettingsError> {
        if !self.config_path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Loads the file, applies overrides from `lookup`, then validates.
    pub fn load<F>(&self, lookup: F) -> Result<Settings, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = self.load_file()?;
        apply_env_overrides(&mut settings, lookup);
        validate(&settings)?;
        Ok(settings)
    }

    /// `load` against the process environment.
    pub fn load_from_env(&self) -> Result<Settings, SettingsError> {
        self.load(|key| std::env::var(key).ok())
    }
}

/// Overrides file values with non-blank environment values.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(token) = get(ENV_GITHUB_TOKEN) {
        settings.github.token = Some(token);
    }
    if let Some(base) = get(ENV_GITHUB_API_BASE) {
        settings.github.api_base = base;
    }
    if let Some(base) = get(ENV_CHART_BASE) {
        settings.charts.base_url = base;
    }
    if let Some(key) = get(ENV_AI_API_KEY) {
        settings.ai.api_key = Some(key);
    }
    if let Some(endpoint) = get(ENV_AI_ENDPOINT) {
        settings.ai.endpoint = endpoint;
    }
    if let Some(model) = get(ENV_AI_MODEL) {
        settings.ai.model = model;
    }
}

/// Rejects values no tool can work with.
pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if !settings.github.api_base.starts_with("http://")
        && !settings.github.api_base.starts_with("https://")
    {
        return Err(SettingsError::InvalidValue(format!(
            "github.api_base must be an http(s) URL: {}",
            settings.github.api_base
        )));
    }
    if settings.guide.max_issues == 0 {
        return Err(SettingsError::InvalidValue(
            "guide.max_issues must be at least 1".to_string(),
        ));
    }
    if settings.charts.width == 0 || settings.charts.height == 0 {
        return Err(SettingsError::InvalidValue(
            "charts.width and charts.height must be positive".to_string(),
        ));
    }
    Ok(())
}
