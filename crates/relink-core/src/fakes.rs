//! In-memory fakes for the branch source trait (testing only)
//!
//! Provides `StaticBranchSource`, `FailingBranchSource`, and
//! `CountingBranchSource` that satisfy the `BranchSource` contract without
//! any network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{RelinkError, Result};
use crate::oracle::BranchSource;
use crate::repo::RepositoryIdentity;

// ---------------------------------------------------------------------------
// StaticBranchSource
// ---------------------------------------------------------------------------

/// Branch source that always returns a fixed set of names.
#[derive(Debug, Clone, Default)]
pub struct StaticBranchSource {
    branches: Vec<String>,
}

impl StaticBranchSource {
    pub fn new(branches: &[&str]) -> Self {
        StaticBranchSource {
            branches: branches.iter().map(|b| b.to_string()).collect(),
        }
    }
}

#[async_trait]
impl BranchSource for StaticBranchSource {
    async fn fetch_branch_names(&self, _repo: &RepositoryIdentity) -> Result<Vec<String>> {
        Ok(self.branches.clone())
    }
}

// ---------------------------------------------------------------------------
// FailingBranchSource
// ---------------------------------------------------------------------------

/// Branch source whose fetch always fails, for fail-closed tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingBranchSource;

#[async_trait]
impl BranchSource for FailingBranchSource {
    async fn fetch_branch_names(&self, _repo: &RepositoryIdentity) -> Result<Vec<String>> {
        Err(RelinkError::BranchFetch("status code: 503".to_string()))
    }
}

// ---------------------------------------------------------------------------
// CountingBranchSource
// ---------------------------------------------------------------------------

/// Branch source that counts fetches, for cache-behaviour tests.
#[derive(Debug, Default)]
pub struct CountingBranchSource {
    branches: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl CountingBranchSource {
    pub fn new(branches: &[&str]) -> Self {
        CountingBranchSource {
            branches: branches.iter().map(|b| b.to_string()).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared fetch counter; clone before handing the source to an oracle.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl BranchSource for CountingBranchSource {
    async fn fetch_branch_names(&self, _repo: &RepositoryIdentity) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.branches.clone())
    }
}
