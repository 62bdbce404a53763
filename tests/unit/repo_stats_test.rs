//! Unit tests for the statistics, language and commit activity fetchers
//! against a mock GitHub API.

use reposcope::services::commit_activity::fetch_commit_activity;
use reposcope::services::github_client::GitHubClient;
use reposcope::services::repo_stats::{fetch_languages, fetch_statistics};
use reposcope::services::report_composer::statistics_report;
use reposcope::types::errors::GitHubError;
use reposcope::types::repository::{PullRequestCounts, RepositoryIdentity};
use reposcope::types::settings::GitHubSettings;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn identity() -> RepositoryIdentity {
    RepositoryIdentity {
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
    }
}

fn client(server: &MockServer, token: Option<&str>) -> GitHubClient {
    GitHubClient::new(&GitHubSettings {
        api_base: server.uri(),
        token: token.map(str::to_string),
        ..GitHubSettings::default()
    })
    .unwrap()
}

fn repo_body() -> Value {
    json!({
        "name": "widgets",
        "full_name": "octo/widgets",
        "description": "Reusable widgets",
        "html_url": "https://github.com/octo/widgets",
        "owner": { "login": "octo", "type": "Organization" },
        "stargazers_count": 1500,
        "forks_count": 200,
        "open_issues_count": 17,
        "watchers_count": 1500,
        "language": "Rust",
        "license": { "name": "MIT License", "spdx_id": "MIT" },
        "created_at": "2024-01-15T10:30:00Z",
        "updated_at": "2024-06-01T08:00:00Z",
        "pushed_at": "2024-06-02T09:00:00Z",
        "private": false,
        "archived": false,
        "disabled": false
    })
}

async fn mount_repo(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_statistics_with_unreachable_secondaries() {
    let server = MockServer::start().await;
    mount_repo(&server).await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/contributors"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // pulls: not mounted, the mock server answers 404

    let stats = fetch_statistics(&client(&server, None), &identity()).await.unwrap();
    assert_eq!(stats.stars, 1500);
    assert_eq!(stats.forks, 200);
    assert_eq!(stats.owner_type, "Organization");
    assert!(stats.contributors.is_empty());
    assert_eq!(stats.pull_requests, PullRequestCounts::new(0, 0, false));
    assert_eq!(stats.pull_requests.total, 0);

    let report = statistics_report(&stats, "");
    assert!(report.contains("No contributors found"));
}

#[tokio::test]
async fn test_statistics_contributors_and_pull_requests() {
    let server = MockServer::start().await;
    mount_repo(&server).await;

    let contributors: Vec<Value> = (0..6)
        .map(|i| {
            json!({
                "login": format!("dev{}", i),
                "contributions": 100 - i,
                "html_url": format!("https://github.com/dev{}", i)
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/contributors"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contributors))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/pulls"))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"state": "open"}, {"state": "closed"}, {"state": "closed"}, {"state": "open"}, {"state": "closed"}
        ])))
        .mount(&server)
        .await;

    let stats = fetch_statistics(&client(&server, None), &identity()).await.unwrap();
    assert_eq!(stats.contributors.len(), 3);
    assert_eq!(stats.contributors[0].username, "dev0");
    assert_eq!(stats.contributors[2].profile_url, "https://github.com/dev2");
    assert_eq!(stats.pull_requests.open, 2);
    assert_eq!(stats.pull_requests.closed, 3);
    assert_eq!(
        stats.pull_requests.total,
        stats.pull_requests.open + stats.pull_requests.closed
    );
    assert_eq!(stats.license.as_ref().unwrap().spdx_id.as_deref(), Some("MIT"));
}

#[tokio::test]
async fn test_statistics_not_found() {
    let server = MockServer::start().await;
    let err = fetch_statistics(&client(&server, None), &identity()).await.unwrap_err();
    assert!(matches!(err, GitHubError::RepositoryNotFound(ref name) if name == "octo/widgets"));
}

#[tokio::test]
async fn test_statistics_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "API rate limit exceeded"})))
        .mount(&server)
        .await;

    let err = fetch_statistics(&client(&server, None), &identity()).await.unwrap_err();
    assert!(matches!(err, GitHubError::RateLimited(_)));
}

#[tokio::test]
async fn test_statistics_other_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"message": "Server Error"})))
        .mount(&server)
        .await;

    let err = fetch_statistics(&client(&server, None), &identity()).await.unwrap_err();
    match err {
        GitHubError::Upstream { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Server Error");
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/languages"))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Rust": 9000, "Shell": 1000})))
        .expect(1)
        .mount(&server)
        .await;

    let languages = fetch_languages(&client(&server, Some("ghp_test")), &identity()).await;
    assert_eq!(languages.get("Rust"), Some(9000));
    assert_eq!(languages.iter().next().map(|(name, _)| name), Some("Rust"));
}

#[tokio::test]
async fn test_languages_failure_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/languages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let languages = fetch_languages(&client(&server, None), &identity()).await;
    assert!(languages.is_empty());
}

#[tokio::test]
async fn test_commit_activity_monthly_buckets() {
    let server = MockServer::start().await;
    // 2024-05-05, 2024-05-12, 2024-06-02
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"week": 1714867200, "total": 5, "days": [0, 1, 1, 1, 1, 1, 0]},
            {"week": 1715472000, "total": 3, "days": [0, 1, 1, 1, 0, 0, 0]},
            {"week": 1717286400, "total": 4, "days": [0, 1, 1, 1, 1, 0, 0]}
        ])))
        .mount(&server)
        .await;

    let series = fetch_commit_activity(&client(&server, None), &identity()).await;
    assert_eq!(series.labels, vec!["2024-05", "2024-06"]);
    assert_eq!(series.data, vec![8, 4]);
}

#[tokio::test]
async fn test_commit_activity_still_computing_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/stats/commit_activity"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .mount(&server)
        .await;

    let series = fetch_commit_activity(&client(&server, None), &identity()).await;
    assert!(series.labels.is_empty());
    assert!(series.data.is_empty());
}
