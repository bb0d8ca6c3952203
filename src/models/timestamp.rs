//! Timestamp parsing for values coming from the remote API.

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an instant: RFC 3339 with offset, or a naive date-time taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_naive(value).map(|naive| naive.and_utc())
}

/// Parse the wall-clock date-time as written, ignoring any zone designator.
///
/// Matchday dates are stored as local times with a trailing `Z`, so grouping by
/// month must look at the written digits rather than the converted instant.
pub fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    parse_naive(value)
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}
