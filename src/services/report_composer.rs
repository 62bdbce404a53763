//! Markdown rendering of statistics, visualization and contribution guides.
//!
//! Pure functions over the normalized records; callers gather the data.

use std::fmt::Write as _;

use chrono::DateTime;

use crate::services::chart_builder::ChartUrls;
use crate::services::issue_guide::{
    action_plan, deliverables, determine_issue_type, extract_requirements, file_suggestions,
    testing_strategy, IssueText,
};
use crate::services::repo_stats::PULL_REQUEST_SAMPLE;
use crate::types::issue::{GoodFirstIssue, IssueDetail};
use crate::types::repository::{CommitActivitySeries, LanguageBreakdown, RepositoryStatistics};

const MAX_INSIGHTS: usize = 3;

/// `1234567` -> `1,234,567`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// ISO-8601 timestamp -> `January 15, 2024`. Unparseable input is returned
/// as-is; a missing timestamp renders as `Unknown`.
pub fn format_long_date(timestamp: Option<&str>) -> String {
    match timestamp {
        None => "Unknown".to_string(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(date) => date.format("%B %-d, %Y").to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

/// Keeps the first three bullet lines of the collaborator's output. Output
/// without bullet lines is used unfiltered.
pub fn format_insights(raw: &str) -> String {
    let bullets: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("- ") || line.starts_with("* ") || line.starts_with("• "))
        .take(MAX_INSIGHTS)
        .collect();

    if !bullets.is_empty() {
        bullets.join("\n")
    } else if raw.trim().is_empty() {
        "_No insights available._".to_string()
    } else {
        raw.trim().to_string()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn overview(stats: &RepositoryStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Overview\n");
    let _ = writeln!(
        out,
        "{}\n",
        stats
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("_No description provided._")
    );
    let _ = writeln!(out, "- **Repository:** [{}]({})", stats.full_name, stats.html_url);
    let _ = writeln!(
        out,
        "- **Primary Language:** {}",
        stats.language.as_deref().unwrap_or("Not specified")
    );
    out
}

/// Full statistics report. `insights_raw` is the collaborator's free text.
pub fn statistics_report(stats: &RepositoryStatistics, insights_raw: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Repository Statistics: {}\n", stats.full_name);
    out.push_str(&overview(stats));

    let _ = writeln!(out, "\n## Statistics\n");
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "|--------|-------|");
    let _ = writeln!(out, "| ⭐ Stars | {} |", format_count(stats.stars));
    let _ = writeln!(out, "| 🍴 Forks | {} |", format_count(stats.forks));
    let _ = writeln!(out, "| 🐛 Open Issues | {} |", format_count(stats.open_issues));
    let _ = writeln!(out, "| 👀 Watchers | {} |", format_count(stats.watchers));

    let _ = writeln!(out, "\n## Owner\n");
    let _ = writeln!(out, "- **Login:** [{0}](https://github.com/{0})", stats.owner);
    let _ = writeln!(out, "- **Type:** {}", stats.owner_type);

    let _ = writeln!(out, "\n## Top Contributors\n");
    if stats.contributors.is_empty() {
        let _ = writeln!(out, "No contributors found.");
    } else {
        for (i, c) in stats.contributors.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. [{}]({}) - {} contributions",
                i + 1,
                c.username,
                c.profile_url,
                format_count(c.contributions)
            );
        }
    }

    let _ = writeln!(out, "\n## Activity Timeline\n");
    let _ = writeln!(out, "- **Created:** {}", format_long_date(stats.created_at.as_deref()));
    let _ = writeln!(out, "- **Last Updated:** {}", format_long_date(stats.updated_at.as_deref()));
    let _ = writeln!(out, "- **Last Push:** {}", format_long_date(stats.pushed_at.as_deref()));

    let prs = &stats.pull_requests;
    let _ = writeln!(out, "\n## Pull Requests\n");
    let _ = writeln!(out, "- **Open:** {}", format_count(prs.open));
    let _ = writeln!(out, "- **Closed:** {}", format_count(prs.closed));
    let _ = writeln!(out, "- **Total:** {}", format_count(prs.total));
    if prs.truncated {
        let _ = writeln!(
            out,
            "\n_Counts cover only the {} most recent pull requests._",
            PULL_REQUEST_SAMPLE
        );
    }

    let _ = writeln!(out, "\n## License\n");
    match &stats.license {
        Some(license) => match &license.spdx_id {
            Some(spdx) => {
                let _ = writeln!(out, "{} ({})", license.name, spdx);
            }
            None => {
                let _ = writeln!(out, "{}", license.name);
            }
        },
        None => {
            let _ = writeln!(out, "No license specified");
        }
    }

    let _ = writeln!(out, "\n## Status\n");
    let _ = writeln!(out, "- **Private:** {}", yes_no(stats.is_private));
    let _ = writeln!(out, "- **Archived:** {}", yes_no(stats.is_archived));
    let _ = writeln!(out, "- **Disabled:** {}", yes_no(stats.is_disabled));

    let _ = writeln!(out, "\n## Insights\n");
    let _ = writeln!(out, "{}", format_insights(insights_raw));
    out
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Sentence describing the language mix with one-decimal percentages.
pub fn language_narrative(languages: &LanguageBreakdown) -> String {
    let total = languages.total_bytes();
    if total == 0 {
        return "No language data available.".to_string();
    }

    let shares: Vec<String> = languages
        .iter()
        .map(|(name, bytes)| format!("{} ({:.1}%)", name, percent(bytes, total)))
        .collect();
    match shares.split_first() {
        Some((first, [])) => format!("The codebase is written entirely in **{}**.", first),
        Some((first, rest)) => format!(
            "The codebase is primarily written in **{}**, followed by {}.",
            first,
            rest.join(", ")
        ),
        None => "No language data available.".to_string(),
    }
}

/// Deterministic observations for the visualization report.
pub fn visualization_insights(
    stats: &RepositoryStatistics,
    languages: &LanguageBreakdown,
    commits: &CommitActivitySeries,
) -> Vec<String> {
    let mut insights = Vec::new();

    let tier = match stats.stars {
        s if s >= 10_000 => "a highly popular project",
        s if s >= 1_000 => "a popular project",
        s if s >= 100 => "a project with a growing community",
        _ => "an early-stage project",
    };
    insights.push(format!(
        "With {} stars, {} is {}.",
        format_count(stats.stars),
        stats.full_name,
        tier
    ));

    if stats.stars > 0 && percent(stats.forks, stats.stars) >= 25.0 {
        insights.push(format!(
            "A high fork ratio ({:.1}% of stars) points to active downstream development.",
            percent(stats.forks, stats.stars)
        ));
    }

    let prs = &stats.pull_requests;
    if prs.total > 0 {
        insights.push(format!(
            "{} of the {} most recent pull requests are closed ({:.1}%).",
            prs.closed,
            prs.total,
            percent(prs.closed, prs.total)
        ));
    }

    if let Some((top, bytes)) = languages.iter().next() {
        let share = percent(bytes, languages.total_bytes());
        if share >= 75.0 {
            insights.push(format!("{} dominates the codebase ({:.1}%).", top, share));
        } else if languages.len() > 1 {
            insights.push(format!(
                "A polyglot codebase spanning {} languages.",
                languages.len()
            ));
        }
    }

    let mut months = commits.labels.iter().zip(&commits.data);
    if let Some((first_month, first)) = months.next() {
        if let Some((last_month, last)) = months.last() {
            let trend = match last.cmp(first) {
                std::cmp::Ordering::Greater => "trending up",
                std::cmp::Ordering::Less => "trending down",
                std::cmp::Ordering::Equal => "steady",
            };
            insights.push(format!(
                "Commit activity is {} ({} commits in {} vs {} in {}).",
                trend, last, last_month, first, first_month
            ));
        }
    }

    if stats.is_archived {
        insights.push("The repository is archived and no longer accepts changes.".to_string());
    }

    insights
}

/// Visualization report embedding the chart images that exist.
pub fn visualization_report(
    stats: &RepositoryStatistics,
    languages: &LanguageBreakdown,
    commits: &CommitActivitySeries,
    charts: &ChartUrls,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Repository Visualization: {}\n", stats.full_name);
    out.push_str(&overview(stats));

    let _ = writeln!(out, "\n## Highlights\n");
    let _ = writeln!(out, "- ⭐ **{}** stars", format_count(stats.stars));
    let _ = writeln!(out, "- 🍴 **{}** forks", format_count(stats.forks));
    let _ = writeln!(out, "- 🐛 **{}** open issues", format_count(stats.open_issues));
    let _ = writeln!(
        out,
        "- 🔀 **{}** open / **{}** closed pull requests",
        format_count(stats.pull_requests.open),
        format_count(stats.pull_requests.closed)
    );

    let _ = writeln!(out, "\n## Repository Statistics\n");
    if charts.bar.is_empty() {
        let _ = writeln!(out, "No statistics to chart yet.");
    } else {
        let _ = writeln!(out, "![Repository Statistics]({})", charts.bar);
    }

    let _ = writeln!(out, "\n## Language Distribution\n");
    let _ = writeln!(out, "{}", language_narrative(languages));
    if !charts.pie.is_empty() {
        let _ = writeln!(out, "\n![Language Distribution]({})", charts.pie);
    }

    let _ = writeln!(out, "\n## Commits Over Time\n");
    if commits.is_empty() {
        let _ = writeln!(out, "No commit activity data available.");
    } else if charts.line.is_empty() {
        let _ = writeln!(out, "No commits recorded in the last year.");
    } else {
        let _ = writeln!(out, "![Commits Over Time]({})", charts.line);
        let _ = writeln!(
            out,
            "\n{} commits across {} months.",
            format_count(commits.total_commits()),
            commits.labels.len()
        );
    }

    let _ = writeln!(out, "\n## Insights\n");
    for insight in visualization_insights(stats, languages, commits) {
        let _ = writeln!(out, "- {}", insight);
    }
    out
}

/// Guide shown when a repository has no good first issues.
pub fn empty_contribution_guide(owner: &str, repo: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Contribution Guide: {}/{}\n", owner, repo);
    let _ = writeln!(out, "## No Good First Issues Available.\n");
    let _ = writeln!(
        out,
        "There are currently no open issues labeled \"good first issue\" in this repository.\n"
    );
    let _ = writeln!(out, "### Other ways to contribute\n");
    let _ = writeln!(out, "- Browse the open issues for something that matches your experience");
    let _ = writeln!(out, "- Improve the documentation or fix typos you come across");
    let _ = writeln!(out, "- Add tests for code paths that lack coverage");
    let _ = writeln!(out, "- Read `CONTRIBUTING.md` and ask maintainers where help is needed");
    out
}

fn guide_section(out: &mut String, repo: &str, issue: &GoodFirstIssue, detail: &IssueDetail) {
    let labels = if detail.labels.is_empty() {
        &issue.labels
    } else {
        &detail.labels
    };
    let text = IssueText::new(&detail.title, &detail.body, labels);
    let issue_type = determine_issue_type(&text);

    let _ = writeln!(out, "## Issue #{}: {}\n", issue.number, issue.title);
    let _ = writeln!(
        out,
        "**Link:** {} | **Comments:** {} | **Labels:** {}\n",
        issue.url,
        detail.comments.max(issue.comments),
        if labels.is_empty() {
            "none".to_string()
        } else {
            labels.join(", ")
        }
    );

    let _ = writeln!(out, "### 🔍 Analysis\n");
    let _ = writeln!(out, "This issue is classified as **{}**.", issue_type);
    let requirements = extract_requirements(&detail.body);
    if requirements.is_empty() {
        let _ = writeln!(
            out,
            "The description lists no explicit requirements; read the discussion thread for details."
        );
    } else {
        let _ = writeln!(out, "\nKey requirements:\n");
        for requirement in &requirements {
            let _ = writeln!(out, "- {}", requirement);
        }
    }

    let _ = writeln!(out, "\n### 📋 Action Plan\n");
    let _ = writeln!(out, "{}", action_plan(issue_type, repo));
    let _ = writeln!(out, "\n### 📁 Files to Look At\n");
    let _ = writeln!(out, "{}", file_suggestions(&text));
    let _ = writeln!(out, "\n### 🧪 Testing Strategy\n");
    let _ = writeln!(out, "{}", testing_strategy(&text));
    let _ = writeln!(out, "\n### ✅ Expected Deliverables\n");
    let _ = writeln!(out, "{}", deliverables(&text));
    let _ = writeln!(out, "\n---\n");
}

/// Contribution guide with one section per issue, in the given order.
///
/// `omitted` counts issues left out of the guide by the issue cap.
pub fn contribution_guide(
    owner: &str,
    repo: &str,
    entries: &[(GoodFirstIssue, IssueDetail)],
    omitted: usize,
) -> String {
    if entries.is_empty() {
        return empty_contribution_guide(owner, repo);
    }

    let mut out = String::new();
    let _ = writeln!(out, "# Contribution Guide: {}/{}\n", owner, repo);
    let _ = writeln!(
        out,
        "Found {} good first issue{} to get you started.",
        entries.len() + omitted,
        if entries.len() + omitted == 1 { "" } else { "s" }
    );
    if omitted > 0 {
        let _ = writeln!(
            out,
            "The guide covers the first {}; {} more are listed on GitHub.",
            entries.len(),
            omitted
        );
    }
    out.push('\n');

    for (issue, detail) in entries {
        guide_section(&mut out, repo, issue, detail);
    }

    let _ = writeln!(out, "## 🚀 Getting Started\n");
    let _ = writeln!(out, "1. Fork the repository: https://github.com/{}/{}", owner, repo);
    let _ = writeln!(out, "2. Clone your fork:");
    let _ = writeln!(out, "   ```bash");
    let _ = writeln!(out, "   git clone https://github.com/<your-username>/{}.git", repo);
    let _ = writeln!(out, "   cd {}", repo);
    let _ = writeln!(out, "   git remote add upstream https://github.com/{}/{}.git", owner, repo);
    let _ = writeln!(out, "   ```");
    let _ = writeln!(out, "3. Create a branch: `git checkout -b fix/issue-<number>`");
    let _ = writeln!(out, "4. Commit your changes with a message referencing the issue");
    let _ = writeln!(out, "5. Push the branch: `git push origin fix/issue-<number>`");
    let _ = writeln!(out, "6. Open a pull request against `{}/{}` and link the issue", owner, repo);
    out
}
