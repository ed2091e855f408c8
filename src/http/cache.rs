//! HTTP cache validation module
//!
//! `Last-Modified` generation and `If-Modified-Since` evaluation.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a timestamp as an IMF-fixdate, e.g. `Sat, 17 Oct 2026 09:05:03 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date header value
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Check whether the client's copy is still current
///
/// Compared at whole-second precision, since that is all the header carries.
/// A missing or unparsable header never matches.
pub fn is_not_modified(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}
