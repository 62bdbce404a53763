//! Raw payload shapes of the GitHub REST API.
//!
//! Only the fetchers see these; everything past them works on the
//! normalized records in `types::repository` and `types::issue`.

use serde::Deserialize;

/// `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Deserialize)]
pub struct RepoPayload {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    pub owner: OwnerPayload,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    pub language: Option<String>,
    pub license: Option<LicensePayload>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
    #[serde(rename = "type", default)]
    pub owner_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LicensePayload {
    pub name: String,
    pub spdx_id: Option<String>,
}

/// One entry of `GET /repos/{owner}/{repo}/contributors`
#[derive(Debug, Clone, Deserialize)]
pub struct ContributorPayload {
    pub login: String,
    #[serde(default)]
    pub contributions: u64,
    #[serde(default)]
    pub html_url: String,
}

/// One entry of `GET /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    pub state: String,
}

/// One entry of `GET /repos/{owner}/{repo}/stats/commit_activity`
#[derive(Debug, Clone, Deserialize)]
pub struct CommitWeekPayload {
    pub week: i64,
    #[serde(default)]
    pub total: u64,
}

/// A label appears either as a bare string or as an object with a `name`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelPayload {
    Name(String),
    Object { name: Option<String> },
}

impl LabelPayload {
    pub fn into_name(self) -> Option<String> {
        match self {
            LabelPayload::Name(name) => Some(name),
            LabelPayload::Object { name } => name,
        }
    }
}

/// Collapses a mixed label list into plain names, dropping nameless entries.
pub fn label_names(labels: Vec<LabelPayload>) -> Vec<String> {
    labels.into_iter().filter_map(LabelPayload::into_name).collect()
}

/// One issue from `GET /repos/{owner}/{repo}/issues[/{number}]`
#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<LabelPayload>,
    #[serde(default)]
    pub comments: u64,
    pub pull_request: Option<serde_json::Value>,
}
