//! Output formatting utilities for CLI operations.
//!
//! Results go to the writer handed in (stdout in production); diagnostics
//! never do.

use std::io::{self, Write};

use orgwatch::github::{CommitRecord, printable_name};
use orgwatch::{OrganisationName, RepositoryRecord, WatchError};

/// Writes one printable name per line.
pub fn write_repository_names<W: Write>(
    writer: &mut W,
    repos: &[RepositoryRecord],
    org: &OrganisationName,
) -> Result<(), WatchError> {
    for repo in repos {
        writeln!(writer, "{}", printable_name(repo, org)).map_err(|e| io_error(&e))?;
    }
    writer.flush().map_err(|e| io_error(&e))
}

/// Writes the SHA, author date, and summary line of `commit`.
pub fn write_commit<W: Write>(writer: &mut W, commit: &CommitRecord) -> Result<(), WatchError> {
    let date = commit.author_date.as_deref().unwrap_or("unknown date");
    let summary = commit.summary().unwrap_or("(no message)");

    writeln!(writer, "{} {date} {summary}", commit.sha).map_err(|e| io_error(&e))?;
    if let Some(url) = commit.html_url.as_deref() {
        writeln!(writer, "{url}").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Converts an I/O error to a [`WatchError::Io`].
pub(crate) fn io_error(error: &io::Error) -> WatchError {
    WatchError::Io {
        message: error.to_string(),
    }
}
