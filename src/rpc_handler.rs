//! Tool dispatch for the reposcope JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` maps a method name and JSON params onto one of the
//! workflow operations and returns its output as JSON.

use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::services::workflow;

/// Name and description of every tool, in `tools.list` order.
pub const TOOLS: &[(&str, &str)] = &[
    ("repo.statistics", "Repository statistics with a Markdown report and insights"),
    ("repo.languages", "Bytes of code per language"),
    ("repo.commit_activity", "Commits per month over the last year"),
    ("repo.visualize", "Statistics, language and commit charts in a Markdown report"),
    ("issues.good_first", "Open issues labeled \"good first issue\" (needs a GitHub token)"),
    ("issues.detail", "Full detail of one issue"),
    ("issues.guide", "Contribution guide for the good first issues (needs a GitHub token)"),
];

fn repo_url(params: &Value) -> Result<&str, String> {
    params
        .get("repoUrl")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "missing repoUrl".to_string())
}

fn to_json<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Dispatch a JSON-RPC method call to the matching tool.
///
/// Returns `Ok(Value)` on success or `Err(String)` with a user-facing message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    tracing::debug!(method, "tool call");
    match method {
        "ping" => Ok(json!({"pong": true})),
        "tools.list" => {
            let tools: Vec<Value> = TOOLS
                .iter()
                .map(|(name, description)| json!({"name": name, "description": description}))
                .collect();
            Ok(json!({ "tools": tools }))
        }

        // ─── Repository ───
        "repo.statistics" => {
            let url = repo_url(params)?;
            let out = workflow::repository_statistics(app, url)
                .await
                .map_err(|e| e.to_string())?;
            to_json(out)
        }
        "repo.languages" => {
            let url = repo_url(params)?;
            let out = workflow::languages(app, url).await.map_err(|e| e.to_string())?;
            to_json(out)
        }
        "repo.commit_activity" => {
            let url = repo_url(params)?;
            let out = workflow::commit_activity(app, url)
                .await
                .map_err(|e| e.to_string())?;
            to_json(out)
        }
        "repo.visualize" => {
            let url = repo_url(params)?;
            let out = workflow::visualization(app, url)
                .await
                .map_err(|e| e.to_string())?;
            to_json(out)
        }

        // ─── Issues ───
        "issues.good_first" => {
            let url = repo_url(params)?;
            let out = workflow::good_first_issues(app, url)
                .await
                .map_err(|e| e.to_string())?;
            to_json(out)
        }
        "issues.detail" => {
            let url = repo_url(params)?;
            let number = params
                .get("issueNumber")
                .and_then(|v| v.as_u64())
                .ok_or("missing issueNumber")?;
            let out = workflow::issue_detail(app, url, number)
                .await
                .map_err(|e| e.to_string())?;
            to_json(out)
        }
        "issues.guide" => {
            let url = repo_url(params)?;
            let out = workflow::contribution_guide(app, url)
                .await
                .map_err(|e| e.to_string())?;
            to_json(out)
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
