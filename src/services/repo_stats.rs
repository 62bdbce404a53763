//! Repository statistics and language fetchers.

use std::collections::HashMap;

use crate::services::github_client::{status_error, GitHubClient};
use crate::types::errors::GitHubError;
use crate::types::github::{ContributorPayload, PullRequestPayload, RepoPayload};
use crate::types::repository::{
    Contributor, LanguageBreakdown, LicenseInfo, PullRequestCounts, RepositoryIdentity,
    RepositoryStatistics,
};

/// Contributors kept in the statistics record.
pub const TOP_CONTRIBUTORS: usize = 3;
/// Page size of the pull request sample; also the counting cap.
pub const PULL_REQUEST_SAMPLE: usize = 100;

/// Fetches repository metadata, contributors and pull requests concurrently
/// and folds them into one statistics record.
///
/// Only the metadata call can fail the operation. Contributors and pull
/// requests fall back to empty values. Pull request counts cover at most the
/// `PULL_REQUEST_SAMPLE` most recent pull requests; `truncated` flags a full
/// page.
pub async fn fetch_statistics(
    client: &GitHubClient,
    identity: &RepositoryIdentity,
) -> Result<RepositoryStatistics, GitHubError> {
    let base = format!("/repos/{}/{}", identity.owner, identity.repo);
    let contributors_path = format!("{}/contributors?per_page=10", base);
    let pulls_path = format!("{}/pulls?state=all&per_page={}", base, PULL_REQUEST_SAMPLE);

    let (metadata, contributors, pulls) = tokio::join!(
        fetch_metadata(client, &base, identity),
        client.fetch_or_default::<Vec<ContributorPayload>>(&contributors_path, Vec::new()),
        client.fetch_or_default::<Vec<PullRequestPayload>>(&pulls_path, Vec::new()),
    );
    let metadata = metadata?;

    Ok(build_statistics(metadata, contributors, &pulls))
}

async fn fetch_metadata(
    client: &GitHubClient,
    path: &str,
    identity: &RepositoryIdentity,
) -> Result<RepoPayload, GitHubError> {
    let response = client.send(path).await?;
    if !response.status().is_success() {
        return Err(status_error(response, &identity.full_name()).await);
    }
    response
        .json::<RepoPayload>()
        .await
        .map_err(|e| GitHubError::Decode(e.to_string()))
}

/// Normalizes the three upstream payloads into a `RepositoryStatistics`.
pub fn build_statistics(
    repo: RepoPayload,
    contributors: Vec<ContributorPayload>,
    pulls: &[PullRequestPayload],
) -> RepositoryStatistics {
    let contributors = contributors
        .into_iter()
        .take(TOP_CONTRIBUTORS)
        .map(|c| Contributor {
            username: c.login,
            contributions: c.contributions,
            profile_url: c.html_url,
        })
        .collect();

    RepositoryStatistics {
        name: repo.name,
        full_name: repo.full_name,
        description: repo.description,
        html_url: repo.html_url,
        owner: repo.owner.login,
        owner_type: repo.owner.owner_type,
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        open_issues: repo.open_issues_count,
        watchers: repo.watchers_count,
        language: repo.language,
        license: repo.license.map(|l| LicenseInfo {
            name: l.name,
            spdx_id: l.spdx_id,
        }),
        created_at: repo.created_at,
        updated_at: repo.updated_at,
        pushed_at: repo.pushed_at,
        is_private: repo.private,
        is_archived: repo.archived,
        is_disabled: repo.disabled,
        contributors,
        pull_requests: count_pull_requests(pulls),
    }
}

/// Counts open and closed pull requests in the sampled page.
pub fn count_pull_requests(pulls: &[PullRequestPayload]) -> PullRequestCounts {
    let sample = &pulls[..pulls.len().min(PULL_REQUEST_SAMPLE)];
    let open = sample.iter().filter(|p| p.state == "open").count() as u64;
    let closed = sample.iter().filter(|p| p.state == "closed").count() as u64;
    PullRequestCounts::new(open, closed, pulls.len() >= PULL_REQUEST_SAMPLE)
}

/// Fetches bytes-per-language. Never fails; errors yield an empty breakdown.
pub async fn fetch_languages(
    client: &GitHubClient,
    identity: &RepositoryIdentity,
) -> LanguageBreakdown {
    let path = format!("/repos/{}/{}/languages", identity.owner, identity.repo);
    let raw = client
        .fetch_or_default::<HashMap<String, u64>>(&path, HashMap::new())
        .await;
    LanguageBreakdown::new(raw)
}
