//! Test helpers for constructing repository fixtures.
//!
//! # Examples
//!
//! ```
//! use orgwatch::github::models::test_support::{numbered_repositories, repository};
//!
//! let repo = repository("acme", "widget");
//! assert_eq!(repo.full_name, "acme/widget");
//!
//! let repos = numbered_repositories("acme", 3);
//! assert_eq!(repos.len(), 3);
//! ```

use super::{RepositoryRecord, SearchResult};

/// Constructs a `RepositoryRecord` owned by `owner`.
#[must_use]
pub fn repository(owner: &str, name: &str) -> RepositoryRecord {
    RepositoryRecord::new(owner, name)
}

/// Creates `count` repositories named `repo-1`, `repo-2`, … owned by `owner`.
#[must_use]
pub fn numbered_repositories(owner: &str, count: usize) -> Vec<RepositoryRecord> {
    (1..=count)
        .map(|index| repository(owner, &format!("repo-{index}")))
        .collect()
}

/// Builds a search page of `page_len` numbered repositories that claims
/// `total_count` matches overall.
#[must_use]
pub fn search_page(owner: &str, total_count: u64, page_len: usize) -> SearchResult {
    SearchResult {
        total_count,
        items: numbered_repositories(owner, page_len),
    }
}
