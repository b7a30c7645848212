//! Error mapping helpers for the Octocrab gateway.
//!
//! Every Octocrab failure passes through here so the rest of the crate only
//! ever sees [`WatchError`].

use http::StatusCode;

use crate::github::error::WatchError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether a status and message describe a rate limit rejection.
///
/// Every 429 is a rate limit. A 403 is one only when GitHub names the limit in
/// the message or documentation URL; otherwise it is a permissions problem.
pub(super) fn is_rate_limit_response(
    status: StatusCode,
    message: &str,
    documentation_url: Option<&str>,
) -> bool {
    match status {
        StatusCode::TOO_MANY_REQUESTS => true,
        StatusCode::FORBIDDEN => {
            message.to_lowercase().contains("rate limit")
                || documentation_url.is_some_and(|url| url.contains("rate-limit"))
        }
        _ => false,
    }
}

/// Maps an HTTP status and optional GitHub message to a [`WatchError`].
pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
    documentation_url: Option<&str>,
) -> WatchError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());

    if is_rate_limit_response(status, &message, documentation_url) {
        return WatchError::RateLimitExceeded {
            message: format!("{operation} failed: {message}"),
        };
    }

    if status == StatusCode::NOT_FOUND {
        return WatchError::NotFound {
            message: format!("{operation} failed: {message}"),
        };
    }

    if is_auth_failure(status) {
        WatchError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else {
        WatchError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> WatchError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(
            operation,
            source.status_code,
            Some(source.message.clone()),
            source.documentation_url.as_deref(),
        );
    }

    if is_network_error(error) {
        return WatchError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    WatchError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
