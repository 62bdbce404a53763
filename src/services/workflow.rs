//! Tool-level operations: parse the URL, fetch, then compose.
//!
//! The statistics workflow runs in two steps, "fetch data" then "generate
//! report"; the language model only contributes the insights blurb.

use serde::Serialize;

use crate::app::App;
use crate::services::chart_builder::ChartUrls;
use crate::services::commit_activity::fetch_commit_activity;
use crate::services::insights::HeuristicInsights;
use crate::services::issue_fetcher::{fetch_good_first_issues, fetch_issue_detail};
use crate::services::repo_stats::{fetch_languages, fetch_statistics};
use crate::services::report_composer;
use crate::services::url_parser::parse_repo_url;
use crate::types::errors::GitHubError;
use crate::types::issue::{GoodFirstIssue, GoodFirstIssues, IssueDetail};
use crate::types::repository::{
    CommitActivitySeries, LanguageBreakdown, RepositoryIdentity, RepositoryStatistics,
};

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsOutput {
    pub statistics: RepositoryStatistics,
    pub report: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguagesOutput {
    pub owner: String,
    pub repo: String,
    pub languages: LanguageBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitActivityOutput {
    pub owner: String,
    pub repo: String,
    pub commit_activity: CommitActivitySeries,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationOutput {
    pub statistics: RepositoryStatistics,
    pub languages: LanguageBreakdown,
    pub commit_activity: CommitActivitySeries,
    pub charts: ChartUrls,
    pub visualization: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuideOutput {
    pub issues: Vec<GoodFirstIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub guide: String,
}

/// Step one: fetch the statistics record.
pub async fn fetch_step(app: &App, repo_url: &str) -> Result<RepositoryStatistics, GitHubError> {
    let identity = parse_repo_url(repo_url)?;
    fetch_statistics(&app.github, &identity).await
}

/// Step two: ask the insights provider, then compose the report. A failing
/// provider degrades to heuristic insights.
pub async fn report_step(app: &App, statistics: &RepositoryStatistics) -> String {
    let insights = match app.insights.insights(statistics).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(repo = %statistics.full_name, error = %e, "insights provider failed");
            HeuristicInsights::bullets(statistics)
        }
    };
    report_composer::statistics_report(statistics, &insights)
}

pub async fn repository_statistics(app: &App, repo_url: &str) -> Result<StatisticsOutput, GitHubError> {
    let statistics = fetch_step(app, repo_url).await?;
    let report = report_step(app, &statistics).await;
    Ok(StatisticsOutput { statistics, report })
}

pub async fn languages(app: &App, repo_url: &str) -> Result<LanguagesOutput, GitHubError> {
    let identity = parse_repo_url(repo_url)?;
    let languages = fetch_languages(&app.github, &identity).await;
    let RepositoryIdentity { owner, repo } = identity;
    Ok(LanguagesOutput { owner, repo, languages })
}

pub async fn commit_activity(app: &App, repo_url: &str) -> Result<CommitActivityOutput, GitHubError> {
    let identity = parse_repo_url(repo_url)?;
    let commit_activity = fetch_commit_activity(&app.github, &identity).await;
    let RepositoryIdentity { owner, repo } = identity;
    Ok(CommitActivityOutput { owner, repo, commit_activity })
}

/// Fetches statistics, languages and commit activity concurrently and
/// renders the chart-embedding report.
pub async fn visualization(app: &App, repo_url: &str) -> Result<VisualizationOutput, GitHubError> {
    let identity = parse_repo_url(repo_url)?;
    let (statistics, languages, commit_activity) = tokio::join!(
        fetch_statistics(&app.github, &identity),
        fetch_languages(&app.github, &identity),
        fetch_commit_activity(&app.github, &identity),
    );
    let statistics = statistics?;

    let charts = app.charts.build_all(&statistics, &languages, &commit_activity);
    let visualization =
        report_composer::visualization_report(&statistics, &languages, &commit_activity, &charts);

    Ok(VisualizationOutput {
        statistics,
        languages,
        commit_activity,
        charts,
        visualization,
    })
}

pub async fn good_first_issues(app: &App, repo_url: &str) -> Result<GoodFirstIssues, GitHubError> {
    let identity = parse_repo_url(repo_url)?;
    fetch_good_first_issues(&app.github, &identity).await
}

pub async fn issue_detail(app: &App, repo_url: &str, number: u64) -> Result<IssueDetail, GitHubError> {
    let identity = parse_repo_url(repo_url)?;
    Ok(fetch_issue_detail(&app.github, &identity.owner, &identity.repo, number).await)
}

/// Lists good first issues, then fetches each issue's detail one at a time
/// in list order and renders the guide.
pub async fn contribution_guide(app: &App, repo_url: &str) -> Result<GuideOutput, GitHubError> {
    let identity = parse_repo_url(repo_url)?;
    let listing = fetch_good_first_issues(&app.github, &identity).await?;

    let max = app.settings.guide.max_issues;
    let omitted = listing.issues.len().saturating_sub(max);
    let mut entries = Vec::with_capacity(listing.issues.len().min(max));
    for issue in listing.issues.iter().take(max) {
        let detail =
            fetch_issue_detail(&app.github, &identity.owner, &identity.repo, issue.number).await;
        entries.push((issue.clone(), detail));
    }

    let guide = report_composer::contribution_guide(&identity.owner, &identity.repo, &entries, omitted);
    Ok(GuideOutput {
        issues: listing.issues,
        message: listing.message,
        guide,
    })
}
