//! Free-text insights for the statistics report.
//!
//! A language model writes a short bullet list about the repository. The
//! heuristic provider stands in when no API key is configured and when the
//! model call fails.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::services::report_composer::{format_count, format_long_date, visualization_insights};
use crate::types::errors::InsightsError;
use crate::types::repository::{CommitActivitySeries, LanguageBreakdown, RepositoryStatistics};
use crate::types::settings::AISettings;

const SYSTEM_PROMPT: &str = "You are an open-source analyst. Reply with at most three short \
Markdown bullet points (each starting with \"- \") of insights about the repository. \
No headings, no preamble.";

/// Produces insight text for a repository.
#[async_trait]
pub trait InsightsProvider: Send + Sync {
    async fn insights(&self, stats: &RepositoryStatistics) -> Result<String, InsightsError>;
}

/// OpenAI-compatible chat completions client.
pub struct ChatCompletionsInsights {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl ChatCompletionsInsights {
    /// Fails with `NoProvider` when the settings carry no API key.
    pub fn new(settings: &AISettings) -> Result<Self, InsightsError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(InsightsError::NoProvider)?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key: api_key.to_string(),
            max_tokens: settings.max_tokens,
        })
    }
}

/// User prompt describing the repository.
pub fn insights_prompt(stats: &RepositoryStatistics) -> String {
    format!(
        "Repository: {}\nDescription: {}\nPrimary language: {}\nStars: {}\nForks: {}\n\
         Open issues: {}\nWatchers: {}\nOpen pull requests: {}\nClosed pull requests: {}\n\
         Top contributors: {}\nCreated: {}\nLast push: {}\nLicense: {}\nArchived: {}",
        stats.full_name,
        stats.description.as_deref().unwrap_or("none"),
        stats.language.as_deref().unwrap_or("unknown"),
        stats.stars,
        stats.forks,
        stats.open_issues,
        stats.watchers,
        stats.pull_requests.open,
        stats.pull_requests.closed,
        stats
            .contributors
            .iter()
            .map(|c| format!("{} ({})", c.username, c.contributions))
            .collect::<Vec<_>>()
            .join(", "),
        format_long_date(stats.created_at.as_deref()),
        format_long_date(stats.pushed_at.as_deref()),
        stats.license.as_ref().map(|l| l.name.as_str()).unwrap_or("none"),
        stats.is_archived,
    )
}

#[async_trait]
impl InsightsProvider for ChatCompletionsInsights {
    async fn insights(&self, stats: &RepositoryStatistics) -> Result<String, InsightsError> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": insights_prompt(stats) },
            ],
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightsError::NetworkError(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                return Err(InsightsError::ProviderError("invalid API key".to_string()))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(InsightsError::RateLimited(self.model.clone()))
            }
            s if !s.is_success() => {
                return Err(InsightsError::ProviderError(format!("HTTP {}", s.as_u16())))
            }
            _ => {}
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| InsightsError::ProviderError(e.to_string()))?;
        payload
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| InsightsError::ProviderError("response has no message content".to_string()))
    }
}

/// Deterministic insights derived from the statistics alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicInsights;

impl HeuristicInsights {
    pub fn bullets(stats: &RepositoryStatistics) -> String {
        let mut lines: Vec<String> = visualization_insights(
            stats,
            &LanguageBreakdown::default(),
            &CommitActivitySeries::default(),
        )
        .into_iter()
        .map(|line| format!("- {}", line))
        .collect();

        if stats.pushed_at.is_some() {
            lines.push(format!(
                "- Last push on {}.",
                format_long_date(stats.pushed_at.as_deref())
            ));
        }
        if let Some(top) = stats.contributors.first() {
            lines.push(format!(
                "- {} leads contributions with {} commits.",
                top.username,
                format_count(top.contributions)
            ));
        }
        lines.join("\n")
    }
}

#[async_trait]
impl InsightsProvider for HeuristicInsights {
    async fn insights(&self, stats: &RepositoryStatistics) -> Result<String, InsightsError> {
        Ok(Self::bullets(stats))
    }
}

/// Picks the chat completions provider when an API key is configured.
pub fn provider_from_settings(settings: &AISettings) -> Box<dyn InsightsProvider> {
    match ChatCompletionsInsights::new(settings) {
        Ok(provider) => Box::new(provider),
        Err(_) => {
            tracing::debug!("no AI API key configured, using heuristic insights");
            Box::new(HeuristicInsights)
        }
    }
}
