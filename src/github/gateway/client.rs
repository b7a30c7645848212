//! Octocrab client construction helpers for gateway implementations.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::WatchError;
use crate::github::locator::{ApiBase, PersonalAccessToken};

use super::error_mapping::map_octocrab_error;

/// Builds an authenticated Octocrab client rooted at `api_base`.
///
/// # Errors
///
/// Returns `WatchError::InvalidUrl` when the base URI cannot be parsed or
/// `WatchError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &ApiBase,
) -> Result<Octocrab, WatchError> {
    let base_uri: Uri = api_base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| WatchError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.value())
        .base_uri(base_uri)
        .map_err(|error| WatchError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
