//! URL rewrite engine: in-place, offset-safe branch substitution.
//!
//! Scans a file's text for repository URLs of the shape
//! `https://<github host>/<owner>/<name>/[blob/]<branch>/...`, asks the
//! branch oracle whether the matched segment is a real branch, and if so
//! splices the target branch name over it. All other bytes are preserved.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::{RelinkError, Result};
use crate::oracle::{BranchOracle, BranchSource};
use crate::repo::RepositoryIdentity;

/// One candidate URL occurrence within a file's original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    /// Byte offset where the branch segment begins (just past the fixed
    /// URL prefix), relative to the original, unmodified text.
    pub prefix_end: usize,

    /// The matched candidate branch-name substring.
    pub segment: String,
}

/// Per-file rewrite outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub path: PathBuf,
    pub modified: bool,
    pub substitutions: usize,
}

/// Build the repository-URL matcher for one repository.
///
/// The host must be a whitespace- and slash-free run containing `github`
/// and ending in `.com`; the branch segment is the shortest non-empty run
/// of non-whitespace characters before the next `/`. An optional `blob/`
/// path component is tolerated between the repository name and the branch.
pub fn branch_url_pattern(repo: &RepositoryIdentity) -> Result<Regex> {
    let pattern = format!(
        r"https?://[^\s/]*github[^\s/]*\.com/{}/{}/(?:blob/)?(\S+?)/",
        regex::escape(&repo.owner),
        regex::escape(&repo.name),
    );

    Ok(Regex::new(&pattern)?)
}

/// Find every non-overlapping URL match, in ascending offset order.
pub fn scan_urls(pattern: &Regex, text: &str) -> Vec<UrlMatch> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|segment| UrlMatch {
            prefix_end: segment.start(),
            segment: segment.as_str().to_string(),
        })
        .collect()
}

/// Rewrite every validated branch URL in one file to `target_branch`.
///
/// Matches are located against the original text but applied to a
/// progressively mutated copy, so each splice position is corrected by the
/// net length change of all earlier substitutions. Segments the oracle
/// does not recognise as branches are left untouched, as are segments
/// already equal to the target (re-running is a no-op). The file is only
/// written back when at least one substitution happened.
pub async fn rewrite_urls_in_file<S: BranchSource>(
    path: &Path,
    pattern: &Regex,
    oracle: &BranchOracle<S>,
    target_branch: &str,
) -> Result<RewriteResult> {
    let mut text = fs::read_to_string(path).map_err(|source| RelinkError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let matches = scan_urls(pattern, &text);

    // Net length change introduced by substitutions applied so far.
    let mut offset: isize = 0;
    let mut substitutions = 0usize;

    for m in matches {
        if m.segment == target_branch {
            continue;
        }
        if !oracle.is_valid_branch_name(&m.segment).await {
            debug!(path = %path.display(), segment = %m.segment, "skipping non-branch segment");
            continue;
        }

        let start = (m.prefix_end as isize + offset) as usize;
        text.replace_range(start..start + m.segment.len(), target_branch);

        substitutions += 1;
        offset += target_branch.len() as isize - m.segment.len() as isize;
    }

    if substitutions > 0 {
        fs::write(path, &text).map_err(|source| RelinkError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(RewriteResult {
        path: path.to_path_buf(),
        modified: substitutions > 0,
        substitutions,
    })
}
