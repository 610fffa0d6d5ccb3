//! Error types for relink-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while validating branches and rewriting URLs.
#[derive(Error, Debug)]
pub enum RelinkError {
    /// Repository identity string did not split into owner and name
    #[error("repository name {0:?} wasn't split into 2 parts (owner/name)")]
    MalformedIdentity(String),

    /// Branch listing fetch failed or returned a non-success status
    #[error("unable to fetch branches: {0}")]
    BranchFetch(String),

    /// File could not be read
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rewritten content could not be written back
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// URL pattern construction failed
    #[error("invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error outside the per-file read/write paths
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error for the branch listing payload
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RelinkError {
    fn from(err: reqwest::Error) -> Self {
        RelinkError::BranchFetch(err.to_string())
    }
}

/// Result type for relink-core operations.
pub type Result<T> = std::result::Result<T, RelinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RelinkError::MalformedIdentity("just-a-name".to_string());
        assert!(err.to_string().contains("owner/name"));

        let err = RelinkError::BranchFetch("status code: 503".to_string());
        assert!(err.to_string().contains("unable to fetch branches"));
    }

    #[test]
    fn test_read_error_carries_path() {
        let err = RelinkError::ReadFile {
            path: PathBuf::from("docs/readme.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("docs/readme.md"));
    }
}
