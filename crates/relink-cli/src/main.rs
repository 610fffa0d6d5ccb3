//! Relink - rewrite branch-pinned repository URLs to a target branch.
//!
//! Intended to run as an automated step in a CI pipeline: given the
//! repository, a target branch, and include/exclude glob patterns, it
//! rewrites every URL that pins a real branch of the repository so it
//! points at the target branch instead, then reports the modified files
//! back to the automation host.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};

use relink_core::{walk_and_rewrite, BranchOracle, GitHubBranchSource, RepositoryIdentity};

mod discover;
mod host;
mod telemetry;

#[derive(Parser)]
#[command(name = "relink")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rewrite branch-pinned repository URLs to a target branch", long_about = None)]
struct Cli {
    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Branch every validated URL should point at
    #[arg(long, env = "INPUT_TARGET_BRANCH")]
    target_branch: String,

    /// Include glob pattern (repeatable; comma-separated via env)
    #[arg(long = "include", env = "INPUT_INCLUDE", value_delimiter = ',')]
    include: Vec<String>,

    /// Exclude glob pattern (repeatable; comma-separated via env)
    #[arg(long = "exclude", env = "INPUT_EXCLUDE", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Directory to search for candidate files
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// API token for private repositories
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    api_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    telemetry::init_tracing(cli.json, level);

    let repo = RepositoryIdentity::parse(&cli.repository)?;
    let files = discover::find_candidate_files(&cli.root, &cli.include, &cli.exclude)?;

    info!(
        repo = %repo,
        target = %cli.target_branch,
        candidates = files.len(),
        "starting relink run"
    );
    if files.is_empty() {
        warn!("no candidate files matched the include/exclude patterns");
    }

    let source = GitHubBranchSource::new(&cli.api_url, cli.github_token.clone());
    let oracle = BranchOracle::new(source, repo);

    let report = walk_and_rewrite(&oracle, &cli.target_branch, &files).await?;

    info!(
        updated = report.updated.len(),
        unchanged = report.unchanged,
        failed = report.failures.len(),
        "relink run complete"
    );
    if !report.clean() {
        for failure in &report.failures {
            warn!(path = %failure.path.display(), error = %failure.message, "file not processed");
        }
    }

    host::emit_updated_files(&report.updated)?;

    Ok(())
}
