// Record identifiers: ECP-YYYYMMDDHHMMSSmmm

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Mints a record id for the given instant.
///
/// Ids embed a UTC timestamp at millisecond precision, so they sort
/// chronologically as plain strings. They are generated once at capture
/// time and never reused.
pub fn record_id_at(ts: DateTime<Utc>) -> String {
    format!(
        "ECP-{:04}{:02}{:02}{:02}{:02}{:02}{:03}",
        ts.year(),
        ts.month(),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second(),
        ts.timestamp_subsec_millis()
    )
}

/// Checks whether a string has the shape of a record id.
pub fn is_record_id(s: &str) -> bool {
    s.len() == 21
        && s.starts_with("ECP-")
        && s[4..].chars().all(|c| c.is_ascii_digit())
}
