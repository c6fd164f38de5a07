//! Completion-timestamp correction. One upstream field carries timestamps
//! with a fixed UTC+9 origin; this shifts them back and re-renders them in
//! local time. Independent of the dictionary; never blocks or reports.

use chrono::{Duration, Local, NaiveDateTime, TimeZone, Utc};

const PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Offset between the upstream timezone origin (UTC+9) and UTC, in seconds.
const UPSTREAM_OFFSET_SECS: i64 = 32400;

/// Shift a `yyyy-MM-dd hh:mm:ss` timestamp back by the upstream offset and
/// format it in local time with the same pattern. Text that does not match
/// the pattern is returned unchanged.
pub fn fix_time(text: &str) -> String {
    let Ok(parsed) = NaiveDateTime::parse_from_str(text, PATTERN) else {
        return text.to_string();
    };
    let shifted = Utc.from_utc_datetime(&(parsed - Duration::seconds(UPSTREAM_OFFSET_SECS)));
    shifted.with_timezone(&Local).format(PATTERN).to_string()
}
