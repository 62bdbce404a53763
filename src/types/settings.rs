use serde::{Deserialize, Serialize};

/// Top-level reposcope settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub github: GitHubSettings,
    pub charts: ChartSettings,
    pub ai: AISettings,
    pub guide: GuideSettings,
}

/// Upstream API access.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GitHubSettings {
    pub api_base: String,
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            token: None,
            user_agent: format!("reposcope/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Chart-rendering service the emitted image URLs point at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartSettings {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            base_url: "https://quickchart.io/chart".to_string(),
            width: 600,
            height: 400,
        }
    }
}

/// OpenAI-compatible chat completions endpoint used for report insights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AISettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
}

impl Default for AISettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            max_tokens: 300,
        }
    }
}

/// Contribution guide generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuideSettings {
    pub max_issues: usize,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self { max_issues: 5 }
    }
}
