//! App Core for reposcope.
//!
//! Holds the settings and the collaborators every tool call shares: the
//! GitHub client, the chart builder and the insights provider.

use std::path::PathBuf;

use crate::services::chart_builder::ChartBuilder;
use crate::services::github_client::GitHubClient;
use crate::services::insights::{provider_from_settings, InsightsProvider};
use crate::services::settings_engine::SettingsEngine;
use crate::types::settings::Settings;

pub struct App {
    pub settings: Settings,
    pub github: GitHubClient,
    pub charts: ChartBuilder,
    pub insights: Box<dyn InsightsProvider>,
}

impl App {
    /// Builds an App from already-resolved settings.
    pub fn new(settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let github = GitHubClient::new(&settings.github)
            .map_err(|e| format!("GitHub client init failed: {}", e))?;
        let charts = ChartBuilder::new(&settings.charts);
        let insights = provider_from_settings(&settings.ai);
        Ok(Self {
            settings,
            github,
            charts,
            insights,
        })
    }

    /// Same as `new` but with an explicit insights provider.
    pub fn with_insights(
        settings: Settings,
        insights: Box<dyn InsightsProvider>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut app = Self::new(settings)?;
        app.insights = insights;
        Ok(app)
    }

    /// Loads settings from `config_path` (or the platform default) plus the
    /// process environment, then builds the App.
    pub fn from_env(config_path: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let settings = SettingsEngine::new(config_path).load_from_env()?;
        Self::new(settings)
    }
}
