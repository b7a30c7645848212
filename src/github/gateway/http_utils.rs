//! Helpers for building request URIs and reading raw GitHub error bodies.

use serde::Deserialize;
use url::Url;
use url::form_urlencoded;

use crate::github::error::WatchError;

/// The `message` and `documentation_url` fields GitHub puts in error bodies.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    pub(super) message: Option<String>,
    pub(super) documentation_url: Option<String>,
}

pub(super) fn parse_error_body(body: &str) -> ErrorBody {
    serde_json::from_str(body).unwrap_or_default()
}

/// Joins `segments` into an absolute API path, percent-encoding each one.
///
/// A segment is never split, so `acme widget` becomes `acme%20widget` and a
/// stray `/` inside a segment is escaped.
pub(super) fn encoded_path<'a, I>(segments: I) -> Result<String, WatchError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = Url::parse("https://api.github.com/")
        .map_err(|error| WatchError::InvalidUrl(error.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| WatchError::InvalidUrl("API path cannot take segments".to_owned()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_owned())
}

/// Appends `params` to `path` as a form-encoded query string.
pub(super) fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_owned();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{path}?{query}")
}
