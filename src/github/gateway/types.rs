//! Public parameter and capability types for gateway operations.

use std::fmt;
use std::str::FromStr;

use crate::github::error::WatchError;

/// Largest page GitHub serves for listing and search endpoints.
pub const MAX_PER_PAGE: u8 = 100;

/// The `type` filter accepted by `GET /orgs/{org}/repos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryType {
    /// Every repository visible to the token.
    #[default]
    All,
    /// Public repositories only.
    Public,
    /// Private repositories only.
    Private,
    /// Forked repositories only.
    Forks,
    /// Non-fork repositories only.
    Sources,
    /// Repositories the caller is a member of.
    Member,
}

impl RepositoryType {
    /// Returns the API parameter value for this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Public => "public",
            Self::Private => "private",
            Self::Forks => "forks",
            Self::Sources => "sources",
            Self::Member => "member",
        }
    }
}

impl FromStr for RepositoryType {
    type Err = WatchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "forks" => Ok(Self::Forks),
            "sources" => Ok(Self::Sources),
            "member" => Ok(Self::Member),
            other => Err(WatchError::InvalidRepositoryType {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key for commit search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitSort {
    /// Sort by author date.
    #[default]
    AuthorDate,
    /// Sort by committer date.
    CommitterDate,
}

impl CommitSort {
    /// Returns the API parameter value for this sort key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorDate => "author-date",
            Self::CommitterDate => "committer-date",
        }
    }
}

/// Sort direction for search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Returns the API parameter value for this order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Parameters for commit search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSearchParams {
    /// Sort key.
    pub sort: CommitSort,
    /// Sort direction.
    pub order: SortOrder,
    /// Items per page (1..=100).
    pub per_page: u8,
}

impl CommitSearchParams {
    /// Parameters selecting the single oldest commit by author date.
    #[must_use]
    pub const fn oldest_first() -> Self {
        Self {
            sort: CommitSort::AuthorDate,
            order: SortOrder::Ascending,
            per_page: 1,
        }
    }

    /// Checks that `per_page` is within GitHub's accepted range.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::InvalidPagination` when `per_page` is 0 or above
    /// [`MAX_PER_PAGE`].
    pub fn validate(&self) -> Result<(), WatchError> {
        if self.per_page == 0 {
            return Err(WatchError::InvalidPagination {
                message: "per_page must be at least 1".to_owned(),
            });
        }

        if self.per_page > MAX_PER_PAGE {
            return Err(WatchError::InvalidPagination {
                message: format!("per_page must not exceed {MAX_PER_PAGE}"),
            });
        }

        Ok(())
    }
}

impl Default for CommitSearchParams {
    fn default() -> Self {
        Self {
            sort: CommitSort::default(),
            order: SortOrder::default(),
            per_page: 30,
        }
    }
}

/// How much of a result set a listing capability returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Every page is fetched; the result is the full set.
    Complete,
    /// Only the first page (up to [`MAX_PER_PAGE`] items) is fetched.
    FirstPageOnly,
}

/// Pagination guarantees a gateway makes for each listing capability.
///
/// Org and subscription listings follow the provider's `Link` headers until
/// exhausted. That completeness is only as good as the provider's headers and
/// has not been checked against every GitHub deployment. Search is
/// deliberately single-page, so callers must treat search results as
/// possibly truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationContract {
    /// Guarantee for `list_org_repositories`.
    pub org_listing: Pagination,
    /// Guarantee for `list_subscriptions`.
    pub subscriptions: Pagination,
    /// Guarantee for `search_repositories` and `search_commits`.
    pub search: Pagination,
}

impl Default for PaginationContract {
    fn default() -> Self {
        Self {
            org_listing: Pagination::Complete,
            subscriptions: Pagination::Complete,
            search: Pagination::FirstPageOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{CommitSearchParams, PaginationContract, Pagination, RepositoryType};
    use crate::github::error::WatchError;

    #[rstest]
    #[case("all", RepositoryType::All)]
    #[case("public", RepositoryType::Public)]
    #[case("private", RepositoryType::Private)]
    #[case("forks", RepositoryType::Forks)]
    #[case("sources", RepositoryType::Sources)]
    #[case("member", RepositoryType::Member)]
    fn repository_type_parses_api_spelling(#[case] raw: &str, #[case] expected: RepositoryType) {
        let parsed: RepositoryType = raw.parse().expect("type should parse");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw);
    }

    #[test]
    fn repository_type_rejects_unknown_values() {
        let result = "Public".parse::<RepositoryType>();
        assert_eq!(
            result,
            Err(WatchError::InvalidRepositoryType {
                value: "Public".to_owned()
            })
        );
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    fn commit_search_params_reject_out_of_range_page_size(#[case] per_page: u8) {
        let params = CommitSearchParams {
            per_page,
            ..CommitSearchParams::oldest_first()
        };

        assert!(
            matches!(params.validate(), Err(WatchError::InvalidPagination { .. })),
            "expected InvalidPagination for per_page={per_page}"
        );
    }

    #[test]
    fn default_contract_is_asymmetric() {
        let contract = PaginationContract::default();
        assert_eq!(contract.org_listing, Pagination::Complete);
        assert_eq!(contract.subscriptions, Pagination::Complete);
        assert_eq!(contract.search, Pagination::FirstPageOnly);
    }
}
