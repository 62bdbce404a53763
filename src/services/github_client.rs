//! HTTP transport for the GitHub REST API.
//!
//! Owns the `reqwest` client, the API base and the optional bearer token.
//! Fetchers build paths; this module sends them and maps HTTP status codes
//! onto `GitHubError`.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::types::errors::GitHubError;
use crate::types::settings::GitHubSettings;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Client for one GitHub API base, shared by every fetcher of a request.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(settings: &GitHubSettings) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        let token = settings
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Self {
            http,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Sends `GET {api_base}{path}`, attaching the bearer token when one is set.
    ///
    /// Returns the response whatever its status; only transport failures err.
    pub async fn send(&self, path: &str) -> Result<Response, GitHubError> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!(%url, authenticated = self.token.is_some(), "GET");

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        Ok(request.send().await?)
    }

    /// Sends `GET path` and decodes a 2xx body, mapping any other status
    /// through `status_error` with `subject` naming the resource.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        subject: &str,
    ) -> Result<T, GitHubError> {
        let response = self.send(path).await?;
        if !response.status().is_success() {
            return Err(status_error(response, subject).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| GitHubError::Decode(e.to_string()))
    }

    /// Best-effort fetch: any failure is logged and replaced by `default`.
    pub async fn fetch_or_default<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        match self.get_json::<T>(path, path).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path, error = %e, "best-effort fetch failed, using default");
                default
            }
        }
    }
}

/// Maps a non-2xx response onto the error taxonomy.
///
/// 404 is a missing repository, 403 a rate limit, anything else an upstream
/// error carrying GitHub's `message` when the body has one.
pub async fn status_error(response: Response, subject: &str) -> GitHubError {
    let status = response.status();
    match status {
        StatusCode::NOT_FOUND => GitHubError::RepositoryNotFound(subject.to_string()),
        StatusCode::FORBIDDEN => GitHubError::RateLimited(subject.to_string()),
        _ => {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            GitHubError::Upstream {
                status: status.as_u16(),
                message,
            }
        }
    }
}
