//! Parsing of comma-separated id filters (`?places=1,2,3`).

/// Message returned for a malformed id list.
pub const INVALID_ID_LIST: &str = "Enter a comma-separated list of integer ids.";

/// Parses a comma-separated list of integer ids.
///
/// An absent or blank parameter means "no filter" and yields `Ok(None)`.
/// Whitespace around tokens is ignored.
///
/// # Errors
///
/// Returns [`INVALID_ID_LIST`] if any token is empty or not an integer.
pub fn parse_id_list(raw: Option<&str>) -> Result<Option<Vec<i64>>, &'static str> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    raw.split(',')
        .map(|token| token.trim().parse::<i64>().map_err(|_| INVALID_ID_LIST))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
