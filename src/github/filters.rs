//! Per-repository predicates that need the gateway.
//!
//! A [`RepositoryFilter`] answers yes or no for a single repository, possibly
//! by making a request. [`FilterChain`] combines filters with logical AND,
//! evaluated left to right and short-circuiting on the first `false`.

use async_trait::async_trait;

use super::error::WatchError;
use super::gateway::RepositoryGateway;
use super::models::RepositoryRecord;

/// Location of the code owners file checked by [`HasCodeowners`].
pub const CODEOWNERS_PATH: &str = ".github/CODEOWNERS";

/// A predicate over a repository.
#[async_trait]
pub trait RepositoryFilter<Gateway>: Send + Sync
where
    Gateway: RepositoryGateway + ?Sized,
{
    /// Returns whether `repo` passes this filter.
    ///
    /// # Errors
    ///
    /// Returns an error when the answer could not be determined.
    async fn matches(&self, repo: &RepositoryRecord, gateway: &Gateway)
    -> Result<bool, WatchError>;
}

/// Keeps repositories that have a `.github/CODEOWNERS` file.
#[derive(Debug, Default, Clone, Copy)]
pub struct HasCodeowners;

#[async_trait]
impl<Gateway> RepositoryFilter<Gateway> for HasCodeowners
where
    Gateway: RepositoryGateway + ?Sized,
{
    async fn matches(
        &self,
        repo: &RepositoryRecord,
        gateway: &Gateway,
    ) -> Result<bool, WatchError> {
        has_codeowners(repo, gateway).await
    }
}

/// Checks whether `repo` has a `.github/CODEOWNERS` file.
///
/// # Errors
///
/// Any failure other than `WatchError::NotFound` is returned unchanged.
pub async fn has_codeowners<Gateway>(
    repo: &RepositoryRecord,
    gateway: &Gateway,
) -> Result<bool, WatchError>
where
    Gateway: RepositoryGateway + ?Sized,
{
    match gateway.file_contents(&repo.full_name, CODEOWNERS_PATH).await {
        Ok(_) => Ok(true),
        Err(WatchError::NotFound { .. }) => Ok(false),
        Err(error) => Err(error),
    }
}

/// An ordered conjunction of filters.
pub struct FilterChain<Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    filters: Vec<Box<dyn RepositoryFilter<Gateway>>>,
}

impl<Gateway> Default for FilterChain<Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<Gateway> FilterChain<Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    /// Create an empty chain, which accepts every repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `filter` to the end of the chain.
    #[must_use]
    pub fn with(mut self, filter: impl RepositoryFilter<Gateway> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Returns true when the chain has no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns whether `repo` passes every filter.
    ///
    /// # Errors
    ///
    /// Returns the first filter error; later filters are not evaluated.
    pub async fn matches(
        &self,
        repo: &RepositoryRecord,
        gateway: &Gateway,
    ) -> Result<bool, WatchError> {
        for filter in &self.filters {
            if !filter.matches(repo, gateway).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Keep the repositories that pass every filter, in input order.
    ///
    /// # Errors
    ///
    /// Returns the first filter error.
    pub async fn retain(
        &self,
        repos: Vec<RepositoryRecord>,
        gateway: &Gateway,
    ) -> Result<Vec<RepositoryRecord>, WatchError> {
        if self.is_empty() {
            return Ok(repos);
        }

        let mut kept = Vec::with_capacity(repos.len());
        for repo in repos {
            if self.matches(&repo, gateway).await? {
                kept.push(repo);
            }
        }
        Ok(kept)
    }
}
