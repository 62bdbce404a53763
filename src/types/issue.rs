use std::fmt;

use serde::{Deserialize, Serialize};

/// An open issue labeled "good first issue".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodFirstIssue {
    pub title: String,
    pub url: String,
    pub labels: Vec<String>,
    pub comments: u64,
    pub number: u64,
}

/// Result of a good-first-issue lookup.
///
/// An empty `issues` list with a `message` is the normal "nothing to show"
/// outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodFirstIssues {
    pub issues: Vec<GoodFirstIssue>,
    pub owner: String,
    pub repo: String,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Full issue payload used while writing a contribution guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub comments: u64,
}

impl IssueDetail {
    /// Stand-in used when the detail request fails.
    pub fn placeholder(number: u64) -> Self {
        Self {
            number,
            title: format!("Issue #{}", number),
            body: String::new(),
            labels: Vec::new(),
            comments: 0,
        }
    }
}

/// Heuristic classification of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    BugFix,
    Documentation,
    Enhancement,
    Testing,
    Performance,
    FeatureAddition,
    Improvement,
    General,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::BugFix => "Bug Fix",
            IssueType::Documentation => "Documentation",
            IssueType::Enhancement => "Enhancement",
            IssueType::Testing => "Testing",
            IssueType::Performance => "Performance",
            IssueType::FeatureAddition => "Feature Addition",
            IssueType::Improvement => "Improvement",
            IssueType::General => "General Issue",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
