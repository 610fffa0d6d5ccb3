//! Candidate file discovery via include/exclude glob patterns.
//!
//! A file is a candidate when it matches at least one include pattern and
//! no exclude pattern. Patterns are interpreted relative to the walk root.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::debug;

/// Resolve the candidate file list under `root`.
///
/// An empty include list yields no candidates. Results are sorted for a
/// deterministic walk order. The `.git` directory is never considered.
pub fn find_candidate_files(
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    if include.is_empty() {
        return Ok(Vec::new());
    }

    let mut overrides = OverrideBuilder::new(root);
    for pattern in include {
        overrides
            .add(pattern)
            .with_context(|| format!("invalid include pattern {pattern:?}"))?;
    }
    for pattern in exclude {
        overrides
            .add(&format!("!{pattern}"))
            .with_context(|| format!("invalid exclude pattern {pattern:?}"))?;
    }
    let overrides = overrides.build()?;

    // Glob matching only: gitignore and hidden-file filtering are the
    // repository's concern, not this tool's.
    let walker = WalkBuilder::new(root)
        .overrides(overrides)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if path.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!(candidates = files.len(), "resolved candidate files");
    Ok(files)
}
