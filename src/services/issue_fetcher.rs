//! Good-first-issue and issue detail fetchers.

use reqwest::StatusCode;

use crate::services::github_client::GitHubClient;
use crate::types::errors::GitHubError;
use crate::types::github::{label_names, IssuePayload};
use crate::types::issue::{GoodFirstIssue, GoodFirstIssues, IssueDetail};
use crate::types::repository::RepositoryIdentity;

pub const GOOD_FIRST_ISSUE_LABEL: &str = "good first issue";

/// Lists open issues labeled "good first issue".
///
/// Requires a token and fails with `MissingCredentials` before any request
/// when none is configured. Upstream failures and empty results are reported
/// through `message` with an empty issue list.
pub async fn fetch_good_first_issues(
    client: &GitHubClient,
    identity: &RepositoryIdentity,
) -> Result<GoodFirstIssues, GitHubError> {
    if !client.has_token() {
        return Err(GitHubError::MissingCredentials);
    }

    let path = format!(
        "/repos/{}/{}/issues?labels=good+first+issue&state=open",
        identity.owner, identity.repo
    );
    let empty = |message: String| GoodFirstIssues {
        issues: Vec::new(),
        owner: identity.owner.clone(),
        repo: identity.repo.clone(),
        total_count: 0,
        message: Some(message),
    };

    let response = match client.send(&path).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(%path, error = %e, "good first issue request failed");
            return Ok(empty(format!("Failed to fetch issues: {}", e)));
        }
    };

    let status = response.status();
    match status {
        StatusCode::NOT_FOUND => {
            return Ok(empty(format!(
                "Repository {} not found or not accessible.",
                identity.full_name()
            )));
        }
        StatusCode::FORBIDDEN => {
            return Ok(empty(
                "GitHub API rate limit exceeded or access forbidden. Check your token.".to_string(),
            ));
        }
        s if !s.is_success() => {
            return Ok(empty(format!(
                "Failed to fetch issues: HTTP {}",
                s.as_u16()
            )));
        }
        _ => {}
    }

    let payload = match response.json::<Vec<IssuePayload>>().await {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(%path, error = %e, "undecodable issue list");
            return Ok(empty(format!("Failed to fetch issues: {}", e)));
        }
    };

    let issues = normalize_issues(payload);
    if issues.is_empty() {
        return Ok(empty(format!(
            "No good first issues found in {}.",
            identity.full_name()
        )));
    }

    Ok(GoodFirstIssues {
        total_count: issues.len(),
        issues,
        owner: identity.owner.clone(),
        repo: identity.repo.clone(),
        message: None,
    })
}

/// Drops pull requests and flattens labels to plain names.
pub fn normalize_issues(payload: Vec<IssuePayload>) -> Vec<GoodFirstIssue> {
    payload
        .into_iter()
        .filter(|issue| issue.pull_request.is_none())
        .map(|issue| GoodFirstIssue {
            title: issue.title,
            url: issue.html_url,
            labels: label_names(issue.labels),
            comments: issue.comments,
            number: issue.number,
        })
        .collect()
}

/// Fetches one issue in full. Never fails; errors yield
/// `IssueDetail::placeholder(number)`.
pub async fn fetch_issue_detail(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    number: u64,
) -> IssueDetail {
    let path = format!("/repos/{}/{}/issues/{}", owner, repo, number);
    match client.get_json::<IssuePayload>(&path, &path).await {
        Ok(issue) => IssueDetail {
            number: issue.number,
            title: issue.title,
            body: issue.body.unwrap_or_default(),
            labels: label_names(issue.labels),
            comments: issue.comments,
        },
        Err(e) => {
            tracing::warn!(%path, error = %e, "issue detail unavailable, using placeholder");
            IssueDetail::placeholder(number)
        }
    }
}
