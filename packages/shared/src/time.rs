//! JST time helpers.

use chrono::{DateTime, FixedOffset, Utc};

/// Get the current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    Utc::now().with_timezone(&jst_offset()).timestamp_millis()
}

/// Render a Unix millisecond timestamp as an ISO 8601 string in JST.
///
/// Returns an empty string for timestamps outside the representable range.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_millis) {
        Some(datetime) => datetime.with_timezone(&jst_offset()).to_rfc3339(),
        None => String::new(),
    }
}

fn jst_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap() // JST is UTC+9
}
