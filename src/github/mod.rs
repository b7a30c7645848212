//! GitHub repository discovery and subscription management.
//!
//! This module wraps Octocrab behind the [`RepositoryGateway`] trait and
//! builds the discovery, ownership, filtering, and subscription workflows on
//! top of it. Errors are mapped into [`WatchError`] variants so that callers
//! can tell rate limiting and missing resources apart from other failures
//! without seeing Octocrab internals.

pub mod error;
pub mod filters;
pub mod finder;
pub mod gateway;
pub mod guard;
pub mod locator;
pub mod models;
pub mod ownership;
pub mod rate_limit;
pub mod subscriptions;

pub use error::WatchError;
pub use filters::{FilterChain, HasCodeowners, RepositoryFilter, has_codeowners};
pub use finder::RepositoryFinder;
pub use gateway::{
    CommitSearchParams, OctocrabGateway, Pagination, PaginationContract, RepositoryGateway,
    RepositoryType,
};
pub use guard::RateLimitGuard;
pub use locator::{ApiBase, OrganisationName, PersonalAccessToken};
pub use models::{CommitRecord, RepositoryRecord, SearchResult, SubscriptionRequest};
pub use ownership::{is_owned_by, printable_name};
pub use rate_limit::RateLimitInfo;
pub use subscriptions::SubscriptionManager;

#[cfg(test)]
pub use gateway::MockRepositoryGateway;
