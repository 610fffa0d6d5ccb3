//! Branch oracle: answers whether a string is a real branch name.
//!
//! Backed by a remote branch listing fetched once and cached for the run.
//! A failed fetch leaves the cache empty, so every candidate reads as
//! invalid until a later fetch succeeds (fail-closed); the next validity
//! check retries the fetch.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{RelinkError, Result};
use crate::repo::RepositoryIdentity;

/// GitHub caps `per_page` at 100; one request per full page of branches.
const PER_PAGE: usize = 100;

/// Provider of the complete branch-name listing for one repository.
#[async_trait]
pub trait BranchSource: Send + Sync {
    /// Fetch every branch name, across all pages.
    async fn fetch_branch_names(&self, repo: &RepositoryIdentity) -> Result<Vec<String>>;
}

/// One branch record from the listing payload. Only the name is kept.
#[derive(Debug, Deserialize)]
struct BranchRecord {
    name: String,
}

/// `BranchSource` backed by the GitHub REST API.
pub struct GitHubBranchSource {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubBranchSource {
    /// Create a source against the given API base URL (no trailing slash),
    /// with an optional bearer token for private repositories.
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("relink/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        GitHubBranchSource {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn branches_url(&self, repo: &RepositoryIdentity, page: usize) -> String {
        format!(
            "{}/repos/{}/{}/branches?per_page={}&page={}",
            self.api_url, repo.owner, repo.name, PER_PAGE, page
        )
    }
}

#[async_trait]
impl BranchSource for GitHubBranchSource {
    async fn fetch_branch_names(&self, repo: &RepositoryIdentity) -> Result<Vec<String>> {
        let mut branches = Vec::new();

        for page in 1.. {
            let url = self.branches_url(repo, page);
            let mut request = self
                .client
                .get(&url)
                .header("Accept", "application/vnd.github+json");
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(RelinkError::BranchFetch(format!(
                    "status code: {status}"
                )));
            }

            let body = response.text().await?;
            let records: Vec<BranchRecord> = serde_json::from_str(&body)?;
            let page_len = records.len();
            branches.extend(records.into_iter().map(|record| record.name));

            if page_len < PER_PAGE {
                break;
            }
        }

        Ok(branches)
    }
}

/// Cached membership oracle over one repository's branch names.
///
/// `populate` is expected to be awaited before file processing begins;
/// after a successful fetch the cache is read-only for the rest of the
/// run and membership checks never touch the network again.
pub struct BranchOracle<S: BranchSource> {
    source: S,
    repo: RepositoryIdentity,
    branches: Mutex<Vec<String>>,
}

impl<S: BranchSource> BranchOracle<S> {
    pub fn new(source: S, repo: RepositoryIdentity) -> Self {
        BranchOracle {
            source,
            repo,
            branches: Mutex::new(Vec::new()),
        }
    }

    /// The repository this oracle answers for.
    pub fn repo(&self) -> &RepositoryIdentity {
        &self.repo
    }

    /// Number of branch names currently cached.
    pub fn branch_count(&self) -> usize {
        self.branches.lock().unwrap().len()
    }

    /// Fetch and cache the branch listing if the cache is still empty.
    ///
    /// A fetch failure is logged and the cache left empty rather than
    /// propagated: a missing listing must never turn into a bad rewrite.
    pub async fn populate(&self) {
        if !self.branches.lock().unwrap().is_empty() {
            return;
        }

        match self.source.fetch_branch_names(&self.repo).await {
            Ok(fetched) => {
                debug!(
                    repo = %self.repo,
                    branches = fetched.len(),
                    "fetched branch listing"
                );
                *self.branches.lock().unwrap() = fetched;
            }
            Err(err) => {
                warn!(repo = %self.repo, error = %err, "unable to validate branches");
            }
        }
    }

    /// Whether `candidate` is currently a real branch name.
    ///
    /// The empty string is never valid and never triggers a remote call.
    /// An empty cache retries the fetch before answering.
    pub async fn is_valid_branch_name(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }

        self.populate().await;

        self.branches
            .lock()
            .unwrap()
            .iter()
            .any(|branch| branch == candidate)
    }
}
