//! Repository identity parsed from an `owner/name` string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RelinkError, Result};

/// A source-control repository, identified by owner and name.
///
/// Constructed from the `owner/name` full-name form that trigger metadata
/// (e.g. `GITHUB_REPOSITORY`) provides. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepositoryIdentity {
    /// Parse a full-name string of the form `owner/name`.
    ///
    /// Fails unless the split yields exactly two non-empty parts.
    pub fn parse(full_name: &str) -> Result<Self> {
        let mut parts = full_name.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(RepositoryIdentity {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(RelinkError::MalformedIdentity(full_name.to_string())),
        }
    }

    /// Full name in `owner/name` format.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryIdentity {
    type Err = RelinkError;

    fn from_str(s: &str) -> Result<Self> {
        RepositoryIdentity::parse(s)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_owner_and_name() {
        let repo = RepositoryIdentity::parse("torvalds/linux").unwrap();
        assert_eq!(repo.owner, "torvalds");
        assert_eq!(repo.name, "linux");
        assert_eq!(repo.full_name(), "torvalds/linux");
    }

    #[test]
    fn test_parse_rejects_missing_slash() {
        let err = RepositoryIdentity::parse("linux").unwrap_err();
        assert!(matches!(err, RelinkError::MalformedIdentity(_)));
    }

    #[test]
    fn test_parse_rejects_extra_parts() {
        assert!(RepositoryIdentity::parse("a/b/c").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!(RepositoryIdentity::parse("/linux").is_err());
        assert!(RepositoryIdentity::parse("torvalds/").is_err());
        assert!(RepositoryIdentity::parse("/").is_err());
        assert!(RepositoryIdentity::parse("").is_err());
    }

    #[test]
    fn test_from_str_roundtrip() {
        let repo: RepositoryIdentity = "acme/widget".parse().unwrap();
        assert_eq!(repo.to_string(), "acme/widget");
    }
}
