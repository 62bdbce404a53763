//! Weekly commit activity, folded into calendar months.

use std::collections::HashMap;

use chrono::DateTime;

use crate::services::github_client::GitHubClient;
use crate::types::github::CommitWeekPayload;
use crate::types::repository::{CommitActivitySeries, RepositoryIdentity};

/// Fetches the last year of weekly commit totals and sums them per month.
///
/// GitHub answers `202 Accepted` with an empty object while it computes the
/// statistics; that, like any other failure, yields an empty series.
pub async fn fetch_commit_activity(
    client: &GitHubClient,
    identity: &RepositoryIdentity,
) -> CommitActivitySeries {
    let path = format!(
        "/repos/{}/{}/stats/commit_activity",
        identity.owner, identity.repo
    );
    let body = client
        .fetch_or_default::<serde_json::Value>(&path, serde_json::Value::Null)
        .await;

    let weeks = match body {
        serde_json::Value::Array(items) if !items.is_empty() => items,
        _ => return CommitActivitySeries::default(),
    };

    match serde_json::from_value::<Vec<CommitWeekPayload>>(serde_json::Value::Array(weeks)) {
        Ok(weeks) => monthly_series(&weeks),
        Err(e) => {
            tracing::warn!(%path, error = %e, "unexpected commit activity shape");
            CommitActivitySeries::default()
        }
    }
}

/// Groups weeks by the UTC `YYYY-MM` of their start timestamp (seconds).
///
/// Months keep the order in which they first appear in `weeks`. Weeks whose
/// timestamp is out of range are skipped.
pub fn monthly_series(weeks: &[CommitWeekPayload]) -> CommitActivitySeries {
    let mut series = CommitActivitySeries::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for week in weeks {
        let Some(start) = DateTime::from_timestamp(week.week, 0) else {
            continue;
        };
        let month = start.format("%Y-%m").to_string();
        match index.get(&month) {
            Some(&i) => series.data[i] += week.total,
            None => {
                index.insert(month.clone(), series.labels.len());
                series.labels.push(month);
                series.data.push(week.total);
            }
        }
    }

    series
}
