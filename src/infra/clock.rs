//! Wall-clock helpers. Timestamps are stored as Unix milliseconds.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Returns the current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Formats a millisecond timestamp in local time with the given
/// `strftime` pattern. Out-of-range values render as an empty string.
pub fn format_millis(millis: i64, pattern: &str) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(utc) => Local.from_utc_datetime(&utc.naive_utc()).format(pattern).to_string(),
        None => String::new(),
    }
}
