//! reposcope command line: run one tool against a GitHub repository URL and
//! print its Markdown report (or the full JSON output with `--json`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use reposcope::app::App;
use reposcope::services::workflow;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to settings.json (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the full JSON output instead of the Markdown report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Repository statistics report with insights
    Stats { repo_url: String },
    /// Bytes of code per language
    Languages { repo_url: String },
    /// Commits per month over the last year
    Commits { repo_url: String },
    /// Chart-embedding visualization report
    Visualize { repo_url: String },
    /// Open good first issues (needs GITHUB_TOKEN)
    Issues { repo_url: String },
    /// Full detail of one issue
    Issue { repo_url: String, number: u64 },
    /// Contribution guide for the good first issues (needs GITHUB_TOKEN)
    Guide { repo_url: String },
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}

async fn run(app: &App, command: Command, as_json: bool) -> Result<(), String> {
    match command {
        Command::Stats { repo_url } => {
            let out = workflow::repository_statistics(app, &repo_url)
                .await
                .map_err(|e| e.to_string())?;
            if as_json {
                print_json(&out)?;
            } else {
                println!("{}", out.report);
            }
        }
        Command::Languages { repo_url } => {
            let out = workflow::languages(app, &repo_url).await.map_err(|e| e.to_string())?;
            print_json(&out)?;
        }
        Command::Commits { repo_url } => {
            let out = workflow::commit_activity(app, &repo_url)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&out)?;
        }
        Command::Visualize { repo_url } => {
            let out = workflow::visualization(app, &repo_url)
                .await
                .map_err(|e| e.to_string())?;
            if as_json {
                print_json(&out)?;
            } else {
                println!("{}", out.visualization);
            }
        }
        Command::Issues { repo_url } => {
            let out = workflow::good_first_issues(app, &repo_url)
                .await
                .map_err(|e| e.to_string())?;
            if as_json {
                print_json(&out)?;
            } else {
                if let Some(message) = &out.message {
                    println!("{}", message);
                }
                for issue in &out.issues {
                    println!("#{} {} ({})", issue.number, issue.title, issue.url);
                }
            }
        }
        Command::Issue { repo_url, number } => {
            let out = workflow::issue_detail(app, &repo_url, number)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&out)?;
        }
        Command::Guide { repo_url } => {
            let out = workflow::contribution_guide(app, &repo_url)
                .await
                .map_err(|e| e.to_string())?;
            if as_json {
                print_json(&out)?;
            } else {
                println!("{}", out.guide);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let app = match App::from_env(args.config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&app, args.command, args.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
