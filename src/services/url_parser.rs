//! Repository URL parsing.
//!
//! Every tool resolves its `repoUrl` here first; no fetcher accepts a URL
//! that did not pass through `parse_repo_url`.

use reqwest::Url;

use crate::types::errors::GitHubError;
use crate::types::repository::RepositoryIdentity;

const GITHUB_HOST: &str = "github.com";

/// Extracts `{owner, repo}` from `http(s)://github.com/<owner>/<repo>[/...]`.
///
/// A trailing `.git` on the repo segment is stripped. Anything else after the
/// repo segment (tree paths, query, fragment) is ignored.
/// Explicit ports, credentials and empty owner or repo segments are rejected.
pub fn parse_repo_url(input: &str) -> Result<RepositoryIdentity, GitHubError> {
    let invalid = || GitHubError::InvalidUrl(input.to_string());

    let url = Url::parse(input.trim()).map_err(|_| invalid())?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid());
    }
    if url.host_str() != Some(GITHUB_HOST) || url.port().is_some() {
        return Err(invalid());
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid());
    }

    let mut segments = url.path_segments().ok_or_else(invalid)?;
    let owner = segments.next().ok_or_else(invalid)?;
    let repo = segments.next().ok_or_else(invalid)?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if owner.is_empty() || repo.is_empty() {
        return Err(invalid());
    }

    Ok(RepositoryIdentity {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
