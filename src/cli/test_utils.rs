//! Shared test utilities for CLI tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use orgwatch::github::gateway::CommitSearchParams;
use orgwatch::github::models::{CommitRecord, CommitSearchResult, FileContents, SearchResult};
use orgwatch::github::{RateLimitInfo, RepositoryType};
use orgwatch::{OrganisationName, RepositoryGateway, RepositoryRecord, WatchError};

/// A gateway that serves canned data and records every call it receives.
#[derive(Default)]
pub struct StubGateway {
    /// Result of every repository search.
    pub search: SearchResult,
    /// Result of every org listing.
    pub org_repositories: Vec<RepositoryRecord>,
    /// Result of every subscription listing.
    pub subscriptions: Vec<RepositoryRecord>,
    /// Full names of repositories that have a CODEOWNERS file.
    pub codeowners: Vec<String>,
    /// Result of every commit search.
    pub commits: Vec<CommitRecord>,
    /// Full name whose subscription mutation fails with `NotFound`.
    pub missing_repository: Option<String>,
    /// Calls received, in order.
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl StubGateway {
    /// Returns the calls received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls mutex should be available")
            .clone()
    }

    fn record(&self, call: String) {
        self.calls
            .lock()
            .expect("calls mutex should be available")
            .push(call);
    }

    fn check_exists(&self, full_name: &str) -> Result<(), WatchError> {
        if self.missing_repository.as_deref() == Some(full_name) {
            return Err(WatchError::NotFound {
                message: format!("subscription for {full_name} failed: Not Found"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RepositoryGateway for StubGateway {
    async fn search_repositories(&self, query: &str) -> Result<SearchResult, WatchError> {
        self.record(format!("search {query}"));
        Ok(self.search.clone())
    }

    async fn search_commits(
        &self,
        query: &str,
        params: &CommitSearchParams,
    ) -> Result<CommitSearchResult, WatchError> {
        self.record(format!("commits {query} per_page={}", params.per_page));
        Ok(CommitSearchResult {
            total_count: self.commits.len() as u64,
            items: self.commits.clone(),
        })
    }

    async fn list_org_repositories(
        &self,
        org: &OrganisationName,
        repo_type: RepositoryType,
    ) -> Result<Vec<RepositoryRecord>, WatchError> {
        self.record(format!("list {} {repo_type}", org.as_str()));
        Ok(self.org_repositories.clone())
    }

    async fn list_subscriptions(&self) -> Result<Vec<RepositoryRecord>, WatchError> {
        self.record("subscriptions".to_owned());
        Ok(self.subscriptions.clone())
    }

    async fn set_subscription(&self, full_name: &str, subscribed: bool) -> Result<(), WatchError> {
        self.record(format!("subscribe {full_name} {subscribed}"));
        self.check_exists(full_name)
    }

    async fn delete_subscription(&self, full_name: &str) -> Result<(), WatchError> {
        self.record(format!("unsubscribe {full_name}"));
        self.check_exists(full_name)
    }

    async fn file_contents(&self, full_name: &str, path: &str) -> Result<FileContents, WatchError> {
        self.record(format!("contents {full_name} {path}"));
        if self.codeowners.iter().any(|name| name == full_name) {
            Ok(FileContents {
                path: path.to_owned(),
                sha: None,
                size: 1,
            })
        } else {
            Err(WatchError::NotFound {
                message: format!("contents of {path} failed: Not Found"),
            })
        }
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo, WatchError> {
        self.record("rate_limit".to_owned());
        Ok(RateLimitInfo::new(5000, 4999, 1_700_000_000))
    }
}
