//! Gateways for talking to the GitHub API through Octocrab.
//!
//! [`RepositoryGateway`] is the complete capability surface the core needs
//! from a hosting provider. The trait-based design enables mocking in tests
//! while [`OctocrabGateway`] handles real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod remote;
mod types;

pub use remote::OctocrabGateway;
pub use types::{
    CommitSearchParams, CommitSort, MAX_PER_PAGE, Pagination, PaginationContract,
    RepositoryType, SortOrder,
};

use async_trait::async_trait;

use crate::github::error::WatchError;
use crate::github::locator::OrganisationName;
use crate::github::models::{CommitSearchResult, FileContents, RepositoryRecord, SearchResult};
use crate::github::rate_limit::RateLimitInfo;

/// Hosting-provider operations used by the finder, subscription manager and
/// filters.
///
/// Implementations are shared by reference and called strictly one request
/// at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// Search repositories. Returns a single page of at most
    /// [`MAX_PER_PAGE`] items; `total_count` reports every match.
    async fn search_repositories(&self, query: &str) -> Result<SearchResult, WatchError>;

    /// Search commits. Returns a single page sized by `params.per_page`.
    async fn search_commits(
        &self,
        query: &str,
        params: &CommitSearchParams,
    ) -> Result<CommitSearchResult, WatchError>;

    /// List every repository of `org` matching `repo_type`, across all pages.
    async fn list_org_repositories(
        &self,
        org: &OrganisationName,
        repo_type: RepositoryType,
    ) -> Result<Vec<RepositoryRecord>, WatchError>;

    /// List every repository the authenticated user watches, across all pages.
    async fn list_subscriptions(&self) -> Result<Vec<RepositoryRecord>, WatchError>;

    /// Set the subscription state for `full_name`.
    ///
    /// Fails with `WatchError::NotFound` when the repository does not exist.
    async fn set_subscription(&self, full_name: &str, subscribed: bool)
    -> Result<(), WatchError>;

    /// Remove the subscription for `full_name`.
    async fn delete_subscription(&self, full_name: &str) -> Result<(), WatchError>;

    /// Fetch metadata for `path` in `full_name`.
    ///
    /// Fails with `WatchError::NotFound` when the file does not exist.
    async fn file_contents(&self, full_name: &str, path: &str)
    -> Result<FileContents, WatchError>;

    /// Read the current rate limit. Used for diagnostics only.
    async fn rate_limit(&self) -> Result<RateLimitInfo, WatchError>;

    /// Pagination guarantees of the listing operations above.
    fn pagination(&self) -> PaginationContract {
        PaginationContract::default()
    }
}
