//! Multi-file rewrite driver.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::oracle::{BranchOracle, BranchSource};
use crate::rewrite::{branch_url_pattern, rewrite_urls_in_file, RewriteResult};

/// A file the walk could not read or write back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of one walk over the candidate files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    /// Paths that were actually modified, in input order.
    pub updated: Vec<PathBuf>,

    /// Files scanned without any substitution.
    pub unchanged: usize,

    /// Files skipped because of a read or write failure.
    pub failures: Vec<FileFailure>,
}

impl WalkReport {
    /// Whether every candidate file was processed cleanly.
    pub fn clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Rewrite branch URLs in every candidate file.
///
/// Forces oracle population up front and validates `target_branch` before
/// any file is touched: an unrecognised target short-circuits the walk and
/// returns an empty report (this is a validation outcome, not an error —
/// it also covers a failed branch fetch, which leaves the oracle empty).
///
/// A read or write failure on one file is logged and recorded in the
/// report; the walk continues with the remaining files.
pub async fn walk_and_rewrite<S: BranchSource>(
    oracle: &BranchOracle<S>,
    target_branch: &str,
    files: &[PathBuf],
) -> Result<WalkReport> {
    oracle.populate().await;

    if !oracle.is_valid_branch_name(target_branch).await {
        warn!(
            target = %target_branch,
            "target branch not found in repository, leaving all files untouched"
        );
        return Ok(WalkReport::default());
    }

    let pattern = branch_url_pattern(oracle.repo())?;
    let mut report = WalkReport::default();

    for path in files {
        match rewrite_urls_in_file(path, &pattern, oracle, target_branch).await {
            Ok(RewriteResult {
                path,
                modified: true,
                substitutions,
            }) => {
                info!(path = %path.display(), substitutions, "updated file");
                report.updated.push(path);
            }
            Ok(_) => report.unchanged += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file");
                report.failures.push(FileFailure {
                    path: path.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}
