//! Keyword heuristics behind the contribution guide.
//!
//! All matching is case-insensitive substring matching over an issue's
//! title, body and labels. Rule tables are evaluated in declaration order
//! and every matching rule contributes its lines.

use crate::types::issue::IssueType;

/// Lowercased view of an issue, built once per guide section.
#[derive(Debug, Clone)]
pub struct IssueText {
    title_and_body: String,
    labels: Vec<String>,
}

impl IssueText {
    pub fn new(title: &str, body: &str, labels: &[String]) -> Self {
        Self {
            title_and_body: format!("{} {}", title, body).to_lowercase(),
            labels: labels.iter().map(|l| l.to_lowercase()).collect(),
        }
    }

    /// True when any label contains `keyword`.
    pub fn has_label(&self, keyword: &str) -> bool {
        self.labels.iter().any(|l| l.contains(keyword))
    }

    /// True when the title or body contains `keyword`.
    pub fn says(&self, keyword: &str) -> bool {
        self.title_and_body.contains(keyword)
    }

    /// True when any keyword appears in the title, body or labels.
    pub fn mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.says(k) || self.has_label(k))
    }
}

const LABEL_TYPES: [(&str, IssueType); 5] = [
    ("bug", IssueType::BugFix),
    ("documentation", IssueType::Documentation),
    ("enhancement", IssueType::Enhancement),
    ("test", IssueType::Testing),
    ("performance", IssueType::Performance),
];

const KEYWORD_TYPES: [(&str, IssueType); 3] = [
    ("fix", IssueType::BugFix),
    ("add", IssueType::FeatureAddition),
    ("improve", IssueType::Improvement),
];

/// Classifies an issue. Labels are checked first in the order bug,
/// documentation, enhancement, test, performance; then title and body for
/// "fix", "add", "improve". First match wins.
pub fn determine_issue_type(text: &IssueText) -> IssueType {
    LABEL_TYPES
        .iter()
        .find(|(keyword, _)| text.has_label(keyword))
        .or_else(|| KEYWORD_TYPES.iter().find(|(keyword, _)| text.says(keyword)))
        .map(|(_, issue_type)| *issue_type)
        .unwrap_or(IssueType::General)
}

const MAX_REQUIREMENTS: usize = 5;
const MIN_REQUIREMENT_LEN: usize = 10;

/// Pulls "should / must / need" sentences out of an issue body.
///
/// Each kept sentence loses its first word; results shorter than ten
/// characters are dropped and at most five are returned in body order.
pub fn extract_requirements(body: &str) -> Vec<String> {
    body.split(['.', '!', '?'])
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            lower.contains("should") || lower.contains("must") || lower.contains("need")
        })
        .map(|sentence| {
            let trimmed = sentence.trim();
            match trimmed.split_once(char::is_whitespace) {
                Some((_, rest)) => rest.trim_start().to_string(),
                None => String::new(),
            }
        })
        .filter(|rest| rest.chars().count() >= MIN_REQUIREMENT_LEN)
        .take(MAX_REQUIREMENTS)
        .collect()
}

/// Canned step list for the issue type. Only the general plan mentions the
/// repository.
pub fn action_plan(issue_type: IssueType, repo: &str) -> String {
    match issue_type {
        IssueType::BugFix => [
            "1. **Reproduce the bug** locally and note the exact steps and environment.",
            "2. **Locate the root cause** by tracing the failing code path (logs, debugger, failing test).",
            "3. **Write a failing test** that captures the incorrect behavior.",
            "4. **Implement the fix** with the smallest change that makes the test pass.",
            "5. **Check for regressions** by running the full test suite.",
        ]
        .join("\n"),
        IssueType::Documentation => [
            "1. **Read the existing docs** around the topic to learn their tone and structure.",
            "2. **Identify the gaps** the issue describes (missing, outdated or unclear content).",
            "3. **Write or update the content**, including examples where they help.",
            "4. **Preview the rendered output** and check every link.",
            "5. **Ask for review** from a maintainer familiar with the area.",
        ]
        .join("\n"),
        IssueType::Testing => [
            "1. **Review the current tests** for the affected code and the conventions they follow.",
            "2. **List the uncovered cases** (edge cases, error paths, regressions).",
            "3. **Write the new tests** next to the existing ones, using the same helpers.",
            "4. **Run the suite** and make sure the new tests fail without the behavior they guard.",
            "5. **Keep tests fast and deterministic** so they are safe to run in CI.",
        ]
        .join("\n"),
        _ => {
            let context = format!(
                "1. **Understand the context** by reading the issue thread and the relevant parts of {}.",
                repo
            );
            [
                context.as_str(),
                "2. **Break the work down** into small, reviewable steps.",
                "3. **Implement the change** following the project's coding conventions.",
                "4. **Add or update tests** that cover the new behavior.",
                "5. **Update documentation** if user-facing behavior changes.",
            ]
            .join("\n")
        }
    }
}

/// One keyword trigger and the lines it contributes.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionRule {
    pub name: &'static str,
    pub applies: fn(&IssueText) -> bool,
    pub lines: &'static [&'static str],
}

/// Lines of every matching rule in order, or `fallback` when none match.
pub fn collect_suggestions(
    rules: &[SuggestionRule],
    fallback: &'static [&'static str],
    text: &IssueText,
) -> Vec<&'static str> {
    let lines: Vec<&'static str> = rules
        .iter()
        .filter(|rule| (rule.applies)(text))
        .flat_map(|rule| rule.lines.iter().copied())
        .collect();
    if lines.is_empty() {
        fallback.to_vec()
    } else {
        lines
    }
}

pub const FILE_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        name: "browser",
        applies: |t| t.mentions(&["firefox", "browser"]),
        lines: &[
            "- Browser-specific adapters or compatibility shims (look for `firefox`, `chrome` or `browser` in file names)",
            "- Any feature-detection or user-agent handling code",
        ],
    },
    SuggestionRule {
        name: "symbols",
        applies: |t| t.mentions(&["symbol", "function"]),
        lines: &[
            "- Parser or symbol-resolution modules that map names to definitions",
            "- Utilities that format or display function signatures",
        ],
    },
    SuggestionRule {
        name: "breakpoints",
        applies: |t| t.mentions(&["breakpoint"]),
        lines: &[
            "- Debugger breakpoint management (setting, removing, persisting breakpoints)",
            "- UI components that render the breakpoint list or gutter markers",
        ],
    },
    SuggestionRule {
        name: "documentation",
        applies: |t| t.has_label("documentation") || t.has_label("docs"),
        lines: &[
            "- `README.md` and files under `docs/`",
            "- Inline doc comments of the public API mentioned in the issue",
        ],
    },
    SuggestionRule {
        name: "tests",
        applies: |t| t.has_label("test"),
        lines: &[
            "- Existing test directories (`tests/`, `__tests__/`, `spec/`) for the affected module",
            "- Shared test fixtures and helpers",
        ],
    },
];

pub const FILE_FALLBACK: &[&str] = &[
    "- Search the codebase for keywords from the issue title",
    "- Start from the module named in the issue and follow its imports",
    "- Check recent commits touching related areas for context",
];

pub const TESTING_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        name: "ui",
        applies: |t| t.mentions(&["user interface", "display", "render", "layout"]),
        lines: &[
            "- Verify the change visually and capture before/after screenshots",
            "- Add component or snapshot tests for the affected view",
        ],
    },
    SuggestionRule {
        name: "browser",
        applies: |t| t.mentions(&["firefox", "browser"]),
        lines: &["- Test in every supported browser, Firefox included"],
    },
    SuggestionRule {
        name: "breakpoints",
        applies: |t| t.mentions(&["breakpoint"]),
        lines: &[
            "- Exercise setting, hitting and removing breakpoints in a sample program",
        ],
    },
    SuggestionRule {
        name: "performance",
        applies: |t| t.mentions(&["performance", "slow"]),
        lines: &[
            "- Measure before and after with a benchmark or profiler",
            "- Include the numbers in the pull request description",
        ],
    },
    SuggestionRule {
        name: "tests",
        applies: |t| t.has_label("test"),
        lines: &["- Run the new tests in isolation and as part of the full suite"],
    },
];

pub const TESTING_FALLBACK: &[&str] = &[
    "- Add unit tests covering the changed behavior",
    "- Run the existing test suite to catch regressions",
];

pub const DELIVERABLE_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        name: "bug",
        applies: |t| t.mentions(&["bug", "fix"]),
        lines: &[
            "- **Fix**: code change resolving the reported behavior",
            "- **Regression test**: a test that fails before the fix and passes after",
        ],
    },
    SuggestionRule {
        name: "feature",
        applies: |t| t.mentions(&["feature", "add", "enhancement"]),
        lines: &[
            "- **Implementation**: the new functionality described in the issue",
            "- **Tests**: coverage for the new code paths",
        ],
    },
    SuggestionRule {
        name: "documentation",
        applies: |t| t.mentions(&["documentation", "docs"]),
        lines: &["- **Documentation**: updated or new docs reflecting the change"],
    },
    SuggestionRule {
        name: "tests",
        applies: |t| t.has_label("test"),
        lines: &["- **Test suite additions**: new tests following project conventions"],
    },
];

pub const DELIVERABLE_FALLBACK: &[&str] = &[
    "- **Code changes** addressing the issue",
    "- **Tests** verifying the change",
];

pub const PULL_REQUEST_DELIVERABLE: &str =
    "- **Pull Request**: a clear description linking the issue, summarizing the change and how it was tested";

pub fn file_suggestions(text: &IssueText) -> String {
    collect_suggestions(FILE_RULES, FILE_FALLBACK, text).join("\n")
}

pub fn testing_strategy(text: &IssueText) -> String {
    collect_suggestions(TESTING_RULES, TESTING_FALLBACK, text).join("\n")
}

/// Deliverables always end with the pull request bullet.
pub fn deliverables(text: &IssueText) -> String {
    let mut lines = collect_suggestions(DELIVERABLE_RULES, DELIVERABLE_FALLBACK, text);
    lines.push(PULL_REQUEST_DELIVERABLE);
    lines.join("\n")
}
