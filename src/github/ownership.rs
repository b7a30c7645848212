//! Ownership checks and display names for repository records.
//!
//! Logins are compared case-insensitively but are never trimmed: an
//! organisation configured as `"acme "` does not own `acme/widget`. Callers
//! that read the organisation from loosely formatted input must clean it up
//! themselves.

use super::locator::OrganisationName;
use super::models::RepositoryRecord;

/// Returns true when `org` owns `repo`, ignoring case.
#[must_use]
pub fn is_owned_by(repo: &RepositoryRecord, org: &OrganisationName) -> bool {
    logins_match(&repo.owner_login, org.as_str())
}

/// Name to show for `repo`: the short name when `org` owns it, otherwise the
/// fully qualified `owner/name`.
#[must_use]
pub fn printable_name<'repo>(repo: &'repo RepositoryRecord, org: &OrganisationName) -> &'repo str {
    if is_owned_by(repo, org) {
        &repo.name
    } else {
        &repo.full_name
    }
}

fn logins_match(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}
