//! Octocrab implementation of the repository gateway.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::github::error::WatchError;
use crate::github::locator::{ApiBase, OrganisationName, PersonalAccessToken};
use crate::github::models::{
    ApiCommitItem, ApiContent, ApiRepository, ApiSearchResponse, CommitSearchResult,
    FileContents, RepositoryRecord, SearchResult,
};
use crate::github::rate_limit::RateLimitInfo;

use super::client::build_octocrab_client;
use super::error_mapping::{map_http_error, map_octocrab_error};
use super::http_utils::{encoded_path, parse_error_body, with_query};
use super::types::{CommitSearchParams, MAX_PER_PAGE, RepositoryType};
use super::RepositoryGateway;

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

#[derive(Debug, Serialize)]
struct SubscriptionBody {
    subscribed: bool,
}

#[derive(Debug, Deserialize)]
struct ApiSubscription {
    subscribed: Option<bool>,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and API base.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::InvalidUrl` when the base URI cannot be parsed or
    /// `WatchError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &ApiBase) -> Result<Self, WatchError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }

    async fn all_repositories(
        &self,
        operation: &str,
        route: String,
        params: &[(&str, &str)],
    ) -> Result<Vec<RepositoryRecord>, WatchError> {
        let first: Page<ApiRepository> = self
            .client
            .get(route, Some(params))
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        let repositories = self
            .client
            .all_pages(first)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        tracing::debug!(operation, count = repositories.len(), "listing complete");
        Ok(repositories
            .into_iter()
            .map(ApiRepository::into)
            .collect())
    }

    /// Sends a raw `GET` so the status is known even when the error body is
    /// empty or not JSON.
    async fn get_json<T>(
        &self,
        operation: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WatchError>
    where
        T: DeserializeOwned,
    {
        let uri = parse_uri(&with_query(path, params))?;
        let response = self
            .client
            ._get(uri)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        let status = response.status();
        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        if !status.is_success() {
            return Err(error_from_body(operation, status, &body));
        }

        serde_json::from_str(&body).map_err(|error| WatchError::Api {
            message: format!("{operation} returned an unreadable body: {error}"),
        })
    }
}

fn parse_uri(path: &str) -> Result<Uri, WatchError> {
    path.parse::<Uri>()
        .map_err(|error| WatchError::InvalidUrl(error.to_string()))
}

fn error_from_body(operation: &str, status: StatusCode, body: &str) -> WatchError {
    let error_body = parse_error_body(body);
    map_http_error(
        operation,
        status,
        error_body.message,
        error_body.documentation_url.as_deref(),
    )
}

fn repository_path<'a, I>(full_name: &'a str, rest: I) -> Result<String, WatchError>
where
    I: IntoIterator<Item = &'a str>,
{
    encoded_path(
        std::iter::once("repos")
            .chain(full_name.split('/'))
            .chain(rest),
    )
}

fn subscription_path(full_name: &str) -> Result<String, WatchError> {
    repository_path(full_name, ["subscription"])
}

#[async_trait]
impl RepositoryGateway for OctocrabGateway {
    async fn search_repositories(&self, query: &str) -> Result<SearchResult, WatchError> {
        tracing::debug!(query, "searching repositories");
        let per_page = MAX_PER_PAGE.to_string();
        let params = [("q", query), ("per_page", per_page.as_str())];

        self.get_json::<ApiSearchResponse<ApiRepository>>(
            "search repositories",
            "/search/repositories",
            &params,
        )
        .await
        .map(SearchResult::from)
    }

    async fn search_commits(
        &self,
        query: &str,
        params: &CommitSearchParams,
    ) -> Result<CommitSearchResult, WatchError> {
        params.validate()?;
        tracing::debug!(query, "searching commits");

        let per_page = params.per_page.to_string();
        let query_params = [
            ("q", query),
            ("sort", params.sort.as_str()),
            ("order", params.order.as_str()),
            ("per_page", per_page.as_str()),
        ];

        self.get_json::<ApiSearchResponse<ApiCommitItem>>(
            "search commits",
            "/search/commits",
            &query_params,
        )
        .await
        .map(CommitSearchResult::from)
    }

    async fn list_org_repositories(
        &self,
        org: &OrganisationName,
        repo_type: RepositoryType,
    ) -> Result<Vec<RepositoryRecord>, WatchError> {
        let per_page = MAX_PER_PAGE.to_string();
        let params = [
            ("type", repo_type.as_str()),
            ("per_page", per_page.as_str()),
        ];

        let route = encoded_path(["orgs", org.as_str(), "repos"])?;
        self.all_repositories("list org repositories", route, &params)
            .await
    }

    async fn list_subscriptions(&self) -> Result<Vec<RepositoryRecord>, WatchError> {
        let per_page = MAX_PER_PAGE.to_string();
        let params = [("per_page", per_page.as_str())];

        self.all_repositories("list subscriptions", "/user/subscriptions".to_owned(), &params)
            .await
    }

    async fn set_subscription(
        &self,
        full_name: &str,
        subscribed: bool,
    ) -> Result<(), WatchError> {
        let body = SubscriptionBody { subscribed };
        let response: ApiSubscription = self
            .client
            .put(subscription_path(full_name)?, Some(&body))
            .await
            .map_err(|error| map_octocrab_error("set subscription", &error))?;

        tracing::debug!(full_name, subscribed = ?response.subscribed, "subscription updated");
        Ok(())
    }

    async fn delete_subscription(&self, full_name: &str) -> Result<(), WatchError> {
        let uri = parse_uri(&subscription_path(full_name)?)?;

        let response = self
            .client
            ._delete(uri, None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("delete subscription", &error))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(full_name, "subscription deleted");
            return Ok(());
        }

        let body = self
            .client
            .body_to_string(response)
            .await
            .unwrap_or_else(|_| String::new());
        Err(error_from_body("delete subscription", status, &body))
    }

    async fn file_contents(
        &self,
        full_name: &str,
        path: &str,
    ) -> Result<FileContents, WatchError> {
        let segments = std::iter::once("contents").chain(path.split('/'));
        let route = repository_path(full_name, segments)?;
        self.get_json::<ApiContent>("file contents", &route, &[])
            .await
            .map(FileContents::from)
    }

    async fn rate_limit(&self) -> Result<RateLimitInfo, WatchError> {
        let rate = self
            .client
            .ratelimit()
            .get()
            .await
            .map_err(|error| map_octocrab_error("rate limit", &error))?
            .rate;

        let limit = u32::try_from(rate.limit).map_err(|_| WatchError::Api {
            message: format!("rate limit value {} out of range", rate.limit),
        })?;
        let remaining = u32::try_from(rate.remaining).map_err(|_| WatchError::Api {
            message: format!("remaining rate limit value {} out of range", rate.remaining),
        })?;

        Ok(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}
