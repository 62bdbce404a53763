use thiserror::Error;

// === GitHubError ===

/// Errors raised while resolving or fetching a repository from GitHub.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The input is not a `http(s)://github.com/<owner>/<repo>` URL.
    #[error("Invalid GitHub repository URL: {0}")]
    InvalidUrl(String),
    /// The upstream API answered 404 for the repository.
    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),
    /// The upstream API answered 403, usually an exhausted rate limit.
    #[error("GitHub API rate limit exceeded or access forbidden: {0}")]
    RateLimited(String),
    /// Any other non-2xx answer from the upstream API.
    #[error("GitHub API error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },
    /// The operation needs a bearer token and none is configured.
    #[error("GitHub token is required for this operation; set GITHUB_TOKEN")]
    MissingCredentials,
    /// The request never produced a response.
    #[error("GitHub network error: {0}")]
    Network(String),
    /// The response body did not have the expected shape.
    #[error("Failed to decode GitHub response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GitHubError::Decode(err.to_string())
        } else {
            GitHubError::Network(err.to_string())
        }
    }
}

// === SettingsError ===

/// Errors related to loading configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading the settings file.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// The settings file is not valid JSON for `Settings`.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// A value was syntactically valid but unusable.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === InsightsError ===

/// Errors from the language-model insights collaborator.
#[derive(Debug, Error)]
pub enum InsightsError {
    /// No API key is configured for the provider.
    #[error("No AI provider configured")]
    NoProvider,
    /// A network error occurred while calling the provider.
    #[error("AI network error: {0}")]
    NetworkError(String),
    /// The provider rate-limited the request.
    #[error("AI rate limited: {0}")]
    RateLimited(String),
    /// The provider returned an error or an unusable body.
    #[error("AI provider error: {0}")]
    ProviderError(String),
}
