//! API base parsing and identity wrappers.

use url::Url;

use super::error::WatchError;

const PUBLIC_API_BASE: &str = "https://api.github.com";

/// Organisation (or user) login whose repositories are listed.
///
/// The value is kept exactly as supplied. It is compared case-insensitively
/// but is never trimmed, so surrounding whitespace makes ownership checks
/// fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganisationName(String);

impl OrganisationName {
    /// Wraps an organisation login.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::MissingOrganisation` when the value is empty.
    pub fn new(value: impl AsRef<str>) -> Result<Self, WatchError> {
        let raw = value.as_ref();
        if raw.is_empty() {
            return Err(WatchError::MissingOrganisation);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the organisation login.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for OrganisationName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, WatchError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WatchError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// REST API root the gateway talks to.
///
/// # Example
///
/// ```
/// use orgwatch::github::locator::ApiBase;
///
/// let public = ApiBase::parse("https://github.com").expect("should parse");
/// assert_eq!(public.as_str(), "https://api.github.com/");
///
/// let enterprise = ApiBase::parse("https://ghe.example.com").expect("should parse");
/// assert_eq!(enterprise.as_str(), "https://ghe.example.com/api/v3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// The public `api.github.com` endpoint.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::InvalidUrl` if the built-in URL fails to parse.
    pub fn public() -> Result<Self, WatchError> {
        Url::parse(PUBLIC_API_BASE)
            .map(Self)
            .map_err(|error| WatchError::InvalidUrl(error.to_string()))
    }

    /// Derives the API root from a host URL.
    ///
    /// `github.com` and `api.github.com` map to the public API. Any other
    /// host without a path is treated as GitHub Enterprise and gets
    /// `/api/v3`; an explicit path is kept as given.
    ///
    /// # Errors
    ///
    /// Returns `WatchError::InvalidUrl` when the input is not an absolute URL
    /// with a host.
    pub fn parse(input: &str) -> Result<Self, WatchError> {
        let parsed =
            Url::parse(input).map_err(|error| WatchError::InvalidUrl(error.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| WatchError::InvalidUrl("URL must include a host".to_owned()))?;

        if host.eq_ignore_ascii_case("github.com") || host.eq_ignore_ascii_case("api.github.com")
        {
            return Self::public();
        }

        if parsed.path().trim_matches('/').is_empty() {
            let mut api_url = parsed;
            api_url.set_path("api/v3");
            return Ok(Self(api_url));
        }

        Ok(Self(parsed))
    }

    /// Borrow the URL as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
