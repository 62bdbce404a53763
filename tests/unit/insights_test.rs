//! Unit tests for the insights providers.

use reposcope::services::insights::*;
use reposcope::types::errors::InsightsError;
use reposcope::types::repository::{Contributor, PullRequestCounts, RepositoryStatistics};
use reposcope::types::settings::AISettings;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_stats() -> RepositoryStatistics {
    RepositoryStatistics {
        name: "widgets".to_string(),
        full_name: "octo/widgets".to_string(),
        description: Some("Reusable widgets".to_string()),
        html_url: "https://github.com/octo/widgets".to_string(),
        owner: "octo".to_string(),
        owner_type: "User".to_string(),
        stars: 40,
        forks: 20,
        open_issues: 2,
        watchers: 40,
        language: Some("Rust".to_string()),
        license: None,
        created_at: Some("2023-05-02T00:00:00Z".to_string()),
        updated_at: Some("2024-01-15T10:30:00Z".to_string()),
        pushed_at: Some("2024-02-01T12:00:00Z".to_string()),
        is_private: false,
        is_archived: true,
        is_disabled: false,
        contributors: vec![Contributor {
            username: "alice".to_string(),
            contributions: 2500,
            profile_url: "https://github.com/alice".to_string(),
        }],
        pull_requests: PullRequestCounts::new(1, 4, false),
    }
}

fn settings(server: &MockServer) -> AISettings {
    AISettings {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        model: "test-model".to_string(),
        api_key: Some("sk-test".to_string()),
        ..AISettings::default()
    }
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "test-model"})))
        .respond_with(response)
        .mount(server)
        .await;
}

#[test]
fn test_missing_api_key_is_no_provider() {
    let result = ChatCompletionsInsights::new(&AISettings::default());
    assert!(matches!(result, Err(InsightsError::NoProvider)));

    let blank = AISettings {
        api_key: Some("  ".to_string()),
        ..AISettings::default()
    };
    assert!(matches!(ChatCompletionsInsights::new(&blank), Err(InsightsError::NoProvider)));
}

#[tokio::test]
async fn test_chat_completion_content_is_returned() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "\n- Active project\n- Small team\n"}}]
        })),
    )
    .await;

    let provider = ChatCompletionsInsights::new(&settings(&server)).unwrap();
    let text = provider.insights(&sample_stats()).await.unwrap();
    assert_eq!(text, "- Active project\n- Small team");
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(429)).await;

    let provider = ChatCompletionsInsights::new(&settings(&server)).unwrap();
    let err = provider.insights(&sample_stats()).await.unwrap_err();
    assert!(matches!(err, InsightsError::RateLimited(ref model) if model == "test-model"));
}

#[tokio::test]
async fn test_invalid_key() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(401)).await;

    let provider = ChatCompletionsInsights::new(&settings(&server)).unwrap();
    let err = provider.insights(&sample_stats()).await.unwrap_err();
    assert_eq!(err.to_string(), "AI provider error: invalid API key");
}

#[tokio::test]
async fn test_missing_content_is_provider_error() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!({"choices": []}))).await;

    let provider = ChatCompletionsInsights::new(&settings(&server)).unwrap();
    let err = provider.insights(&sample_stats()).await.unwrap_err();
    assert!(matches!(err, InsightsError::ProviderError(_)));
}

#[test]
fn test_prompt_describes_repository() {
    let prompt = insights_prompt(&sample_stats());
    assert!(prompt.contains("Repository: octo/widgets"));
    assert!(prompt.contains("Stars: 40"));
    assert!(prompt.contains("alice (2500)"));
    assert!(prompt.contains("License: none"));
}

#[tokio::test]
async fn test_heuristic_bullets() {
    let text = HeuristicInsights.insights(&sample_stats()).await.unwrap();
    assert!(text.lines().all(|line| line.starts_with("- ")));
    assert!(text.contains("an early-stage project"));
    assert!(text.contains("fork ratio (50.0% of stars)"));
    assert!(text.contains("archived"));
    assert!(text.contains("- Last push on February 1, 2024."));
    assert!(text.contains("- alice leads contributions with 2,500 commits."));
}

#[tokio::test]
async fn test_provider_from_settings_without_key_is_heuristic() {
    let provider = provider_from_settings(&AISettings::default());
    let text = provider.insights(&sample_stats()).await.unwrap();
    assert_eq!(text, HeuristicInsights::bullets(&sample_stats()));
}
