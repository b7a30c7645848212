//! Error types exposed by the GitHub layer.

use thiserror::Error;

/// Errors surfaced while loading configuration or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WatchError {
    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// No organisation was configured.
    #[error("organisation is required (use --org or set GITHUB_ORG)")]
    MissingOrganisation,

    /// The configured API base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository type filter is not one GitHub understands.
    #[error("unknown repository type: {value}")]
    InvalidRepositoryType {
        /// The rejected value.
        value: String,
    },

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// The requested resource does not exist or is not visible to the token.
    #[error("not found: {message}")]
    NotFound {
        /// Operation and GitHub message describing the missing resource.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// GitHub returned some other API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl WatchError {
    /// Returns true for the rate limit variant.
    #[must_use]
    pub const fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Returns true for the not-found variant.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
