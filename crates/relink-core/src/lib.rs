//! Relink Core - branch-pinned URL rewriting
//!
//! This crate rewrites branch-pinned repository URLs embedded in text
//! files so they point at a designated target branch. Candidate branch
//! segments are validated against the repository's real branch listing
//! before any substitution, so non-branch path segments (wiki links and
//! the like) that happen to match the URL shape are left alone.
//!
//! ## Components
//!
//! - [`oracle`]: cached, fail-closed "is this a real branch?" oracle
//! - [`rewrite`]: offset-safe in-place URL rewrite engine
//! - [`walk`]: multi-file driver with per-file failure isolation
//! - [`fakes`]: in-memory branch sources for tests

pub mod error;
pub mod fakes;
pub mod oracle;
pub mod repo;
pub mod rewrite;
pub mod walk;

// Re-export key types
pub use error::{RelinkError, Result};
pub use oracle::{BranchOracle, BranchSource, GitHubBranchSource};
pub use repo::RepositoryIdentity;
pub use rewrite::{branch_url_pattern, rewrite_urls_in_file, RewriteResult, UrlMatch};
pub use walk::{walk_and_rewrite, FileFailure, WalkReport};
