//! Cosmetic formatting for durations and timestamps.
//!
//! Not correctness-critical; failures fall back to a placeholder string
//! rather than erroring.

use chrono::{DateTime, FixedOffset};

use crate::domain::clock::EpochSeconds;
use crate::domain::duration::TradeDuration;

/// Platform display timezone: UTC+7, no DST.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// Formats a duration for display: "30s", "1m", "5m", "1m30s".
pub fn format_duration(duration: TradeDuration) -> String {
    let secs = duration.as_secs();
    let minutes = secs / 60;
    let rest = secs % 60;
    match (minutes, rest) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m{s}s"),
    }
}

/// Formats an epoch-second timestamp in the platform's local timezone
/// as `YYYY-MM-DD HH:MM:SS`.
pub fn format_local_timestamp(t: EpochSeconds, utc_offset_hours: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600);
    let datetime = DateTime::from_timestamp(t, 0);
    match (offset, datetime) {
        (Some(offset), Some(dt)) => dt
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        _ => "invalid timestamp".to_string(),
    }
}
