//! Small CSV helpers shared by the pipeline commands.

use csv::StringRecord;

use crate::CliError;

/// Finds a header's position, case-insensitively.
#[must_use]
pub fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Finds a required header's position, case-insensitively.
///
/// # Errors
///
/// Returns [`CliError::MissingColumn`] when the header is absent.
pub fn require_column(headers: &StringRecord, name: &str) -> Result<usize, CliError> {
    find_column(headers, name).ok_or_else(|| CliError::MissingColumn {
        name: name.to_string(),
    })
}

/// Reads a cell by optional position, trimmed; absent cells are empty.
#[must_use]
pub fn cell<'a>(record: &'a StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).map_or("", str::trim)
}

/// Coerces a cell to a number; malformed or missing values are 0.
#[must_use]
pub fn numeric_cell(record: &StringRecord, idx: Option<usize>) -> f64 {
    cell(record, idx).parse().unwrap_or(0.0)
}
