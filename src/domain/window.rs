//! UTC daily-window policy for windowed volume accounting.

use chrono::{DateTime, TimeZone, Utc};

/// Seconds per accounting window (one UTC day).
const WINDOW_SECS: i64 = 86_400;

/// Truncate a timestamp to the start of its UTC day (00:00 UTC).
#[must_use]
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let secs = now.timestamp().div_euclid(WINDOW_SECS) * WINDOW_SECS;
    // Any multiple of 86400 is a representable instant.
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Whether an event at `now` opens a new window relative to the stored
/// window start.
///
/// Strictly greater: an event at exactly the stored window start stays in
/// the current window.
#[must_use]
pub fn opens_new_window(stored: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    window_start(now) > stored
}
