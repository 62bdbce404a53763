// reposcope services
// Fetchers talk to GitHub; builders and composers turn their records into charts and Markdown.

pub mod chart_builder;
pub mod commit_activity;
pub mod github_client;
pub mod insights;
pub mod issue_fetcher;
pub mod issue_guide;
pub mod repo_stats;
pub mod report_composer;
pub mod settings_engine;
pub mod url_parser;
pub mod workflow;
