//! Reading repository names from an input stream.

use std::io::BufRead;

use orgwatch::WatchError;

use super::output::io_error;

/// Reads one repository name per line.
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
pub fn read_names<R: BufRead>(reader: R) -> Result<Vec<String>, WatchError> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| io_error(&e))?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}
