//! Repository discovery for an organisation.
//!
//! [`RepositoryFinder`] lists an organisation's repositories either in full
//! or by topic. Topic search only ever reads the first page of results, so
//! the finder warns on the diagnostic channel when the provider reports more
//! matches than it returned.

use tracing::debug;

use crate::diagnostics::{DiagnosticEvent, DiagnosticSink};

use super::error::WatchError;
use super::gateway::{
    CommitSearchParams, MAX_PER_PAGE, Pagination, RepositoryGateway, RepositoryType,
};
use super::guard::RateLimitGuard;
use super::locator::OrganisationName;
use super::models::{CommitRecord, RepositoryRecord};

/// Discovers repositories through a gateway.
pub struct RepositoryFinder<'client, Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    client: &'client Gateway,
    sink: &'client dyn DiagnosticSink,
}

impl<'client, Gateway> RepositoryFinder<'client, Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    /// Create a finder reporting progress through `sink`.
    #[must_use]
    pub const fn new(client: &'client Gateway, sink: &'client dyn DiagnosticSink) -> Self {
        Self { client, sink }
    }

    /// List every repository of `org` matching `repo_type`.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn list_all(
        &self,
        org: &OrganisationName,
        repo_type: RepositoryType,
    ) -> Result<Vec<RepositoryRecord>, WatchError> {
        self.client.list_org_repositories(org, repo_type).await
    }

    /// List repositories of `org` tagged with `topic`.
    ///
    /// Only the first page of search results is returned. When the provider
    /// reports more matches than fit on that page a
    /// [`DiagnosticEvent::TruncatedResults`] warning is emitted.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn list_for_topic(
        &self,
        org: &OrganisationName,
        topic: &str,
    ) -> Result<Vec<RepositoryRecord>, WatchError> {
        self.sink.emit(&DiagnosticEvent::TopicSearchStarted {
            org: org.as_str().to_owned(),
            topic: topic.to_owned(),
        });

        let query = topic_query(org, topic);
        debug!(%query, "searching repositories");
        let result = self.client.search_repositories(&query).await?;

        self.sink.emit(&DiagnosticEvent::TopicSearchCompleted {
            found: result.items.len(),
        });

        if self.client.pagination().search == Pagination::FirstPageOnly
            && is_truncated(result.total_count, result.items.len())
        {
            self.sink.emit(&DiagnosticEvent::TruncatedResults {
                total_count: result.total_count,
                retrieved: result.items.len(),
            });
        }

        Ok(result.items)
    }

    /// Resolve the repositories to act on.
    ///
    /// A missing or empty `topic` lists every repository of `org` matching
    /// `repo_type`; otherwise the topic search is used and `repo_type` is
    /// ignored. Either path runs inside the rate limit guard.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn resolve(
        &self,
        org: &OrganisationName,
        topic: Option<&str>,
        repo_type: RepositoryType,
    ) -> Result<Vec<RepositoryRecord>, WatchError> {
        let guard = RateLimitGuard::new(self.client, self.sink);
        match topic.filter(|value| !value.is_empty()) {
            Some(topic) => guard.run(|| self.list_for_topic(org, topic)).await,
            None => guard.run(|| self.list_all(org, repo_type)).await,
        }
    }

    /// Find the oldest non-merge commit of `full_name` by author date.
    ///
    /// Returns `None` when the repository has no searchable commits.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn first_commit(&self, full_name: &str) -> Result<Option<CommitRecord>, WatchError> {
        // Commit search rejects a query made only of `repo:`.
        let query = format!("repo:{full_name} merge:false");
        let params = CommitSearchParams::oldest_first();
        let guard = RateLimitGuard::new(self.client, self.sink);

        let result = guard
            .run(|| self.client.search_commits(&query, &params))
            .await?;

        Ok(result.items.into_iter().next())
    }
}

fn topic_query(org: &OrganisationName, topic: &str) -> String {
    format!("user:{} topic:{topic}", org.as_str())
}

fn is_truncated(total_count: u64, retrieved: usize) -> bool {
    total_count > u64::from(MAX_PER_PAGE) && retrieved == usize::from(MAX_PER_PAGE)
}
