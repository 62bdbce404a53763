use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The `{owner, repo}` pair addressing a repository on the GitHub API.
///
/// Both fields are non-empty and `repo` never ends in `.git`; construct it
/// through `services::url_parser::parse_repo_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub repo: String,
}

impl RepositoryIdentity {
    /// `owner/repo`, as GitHub spells a full name.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// License summary of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub name: String,
    pub spdx_id: Option<String>,
}

/// One of the top contributors of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub username: String,
    pub contributions: u64,
    pub profile_url: String,
}

/// Pull request counts over the most recent page of pull requests.
///
/// `total == open + closed` always holds. `truncated` is set when the page
/// came back full, so older pull requests were not counted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestCounts {
    pub open: u64,
    pub closed: u64,
    pub total: u64,
    pub truncated: bool,
}

impl PullRequestCounts {
    pub fn new(open: u64, closed: u64, truncated: bool) -> Self {
        Self {
            open,
            closed,
            total: open + closed,
            truncated,
        }
    }
}

/// Normalized statistics for one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStatistics {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub owner: String,
    pub owner_type: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub watchers: u64,
    pub language: Option<String>,
    pub license: Option<LicenseInfo>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub is_private: bool,
    pub is_archived: bool,
    pub is_disabled: bool,
    pub contributors: Vec<Contributor>,
    pub pull_requests: PullRequestCounts,
}

/// Bytes of code per language, largest first.
///
/// An empty breakdown means "no data", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBreakdown {
    entries: Vec<(String, u64)>,
}

impl LanguageBreakdown {
    /// Builds a breakdown ordered by byte count descending, ties by name.
    pub fn new(entries: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut entries: Vec<(String, u64)> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, bytes)| (name.as_str(), *bytes))
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|(_, bytes)| bytes).sum()
    }

    pub fn get(&self, language: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, bytes)| *bytes)
    }
}

impl Serialize for LanguageBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, bytes) in &self.entries {
            map.serialize_entry(name, bytes)?;
        }
        map.end()
    }
}

/// Commits per calendar month, in chronological order.
///
/// `labels` and `data` always have the same length; `data[i]` is the commit
/// count of month `labels[i]` (`YYYY-MM`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitActivitySeries {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

impl CommitActivitySeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total_commits(&self) -> u64 {
        self.data.iter().sum()
    }
}
