//! Time and timestamp helpers.

use chrono::{DateTime, TimeZone, Utc};

/// UTC timestamp attached to every reading.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Build a timestamp from whole seconds since the Unix epoch.
///
/// Returns `None` when `secs` is outside the representable range.
#[must_use]
pub fn from_unix_secs(secs: i64) -> Option<Timestamp> {
    Utc.timestamp_opt(secs, 0).single()
}
