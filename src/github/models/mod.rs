//! Data models representing repositories, searches, and commits.
//!
//! This module contains domain models for data returned by the GitHub API.
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into public domain types.


use serde::{Deserialize, Serialize};

use super::locator::OrganisationName;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Identity of a remote repository.
///
/// Records are produced by a gateway and never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Fully qualified `owner/name`.
    pub full_name: String,
    /// Short repository name.
    pub name: String,
    /// Login of the owning user or organisation.
    pub owner_login: String,
}

impl RepositoryRecord {
    /// Builds a record from an owner login and a short name.
    #[must_use]
    pub fn new(owner_login: &str, name: &str) -> Self {
        Self {
            full_name: format!("{owner_login}/{name}"),
            name: name.to_owned(),
            owner_login: owner_login.to_owned(),
        }
    }
}

/// One page of a repository search.
///
/// `items` holds at most one provider page (100 entries), while
/// `total_count` is the provider's count of every match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Total number of matches reported by the provider.
    pub total_count: u64,
    /// Matches on the returned page, in provider order.
    pub items: Vec<RepositoryRecord>,
}

/// A commit returned by commit search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Commit SHA.
    pub sha: String,
    /// Full commit message.
    pub message: Option<String>,
    /// Author date (ISO 8601 format).
    pub author_date: Option<String>,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
}

impl CommitRecord {
    /// First line of the commit message, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.message.as_deref().and_then(|message| message.lines().next())
    }
}

/// One page of a commit search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSearchResult {
    /// Total number of matches reported by the provider.
    pub total_count: u64,
    /// Matches on the returned page.
    pub items: Vec<CommitRecord>,
}

/// Metadata of a file fetched through the contents API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContents {
    /// Path of the file within the repository.
    pub path: String,
    /// Blob SHA if reported.
    pub sha: Option<String>,
    /// File size in bytes.
    pub size: u64,
}

/// A single subscription mutation target: an organisation and a short
/// repository name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionRequest<'a> {
    org: &'a OrganisationName,
    name: &'a str,
}

impl<'a> SubscriptionRequest<'a> {
    /// Pairs an organisation with a short repository name.
    #[must_use]
    pub const fn new(org: &'a OrganisationName, name: &'a str) -> Self {
        Self { org, name }
    }

    /// The `org/name` form used by the subscription endpoints.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org.as_str(), self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) name: String,
    pub(super) full_name: String,
    pub(super) owner: ApiOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiOwner {
    pub(super) login: String,
}

/// Envelope shared by the search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiSearchResponse<T> {
    pub(super) total_count: u64,
    #[serde(default = "Vec::new")]
    pub(super) items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitItem {
    pub(super) sha: String,
    pub(super) html_url: Option<String>,
    pub(super) commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitDetail {
    pub(super) message: Option<String>,
    pub(super) author: Option<ApiCommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitAuthor {
    pub(super) date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiContent {
    pub(super) path: String,
    pub(super) sha: Option<String>,
    #[serde(default)]
    pub(super) size: u64,
}

impl From<ApiRepository> for RepositoryRecord {
    fn from(value: ApiRepository) -> Self {
        Self {
            full_name: value.full_name,
            name: value.name,
            owner_login: value.owner.login,
        }
    }
}

impl From<ApiSearchResponse<ApiRepository>> for SearchResult {
    fn from(value: ApiSearchResponse<ApiRepository>) -> Self {
        Self {
            total_count: value.total_count,
            items: value.items.into_iter().map(ApiRepository::into).collect(),
        }
    }
}

impl From<ApiCommitItem> for CommitRecord {
    fn from(value: ApiCommitItem) -> Self {
        Self {
            sha: value.sha,
            message: value.commit.message,
            author_date: value.commit.author.and_then(|author| author.date),
            html_url: value.html_url,
        }
    }
}

impl From<ApiSearchResponse<ApiCommitItem>> for CommitSearchResult {
    fn from(value: ApiSearchResponse<ApiCommitItem>) -> Self {
        Self {
            total_count: value.total_count,
            items: value.items.into_iter().map(ApiCommitItem::into).collect(),
        }
    }
}

impl From<ApiContent> for FileContents {
    fn from(value: ApiContent) -> Self {
        Self {
            path: value.path,
            sha: value.sha,
            size: value.size,
        }
    }
}
