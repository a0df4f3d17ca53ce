//! Second-resolution time arithmetic over one-minute candle boundaries.
//!
//! All functions are pure over explicit `EpochSeconds` inputs. "Now" itself
//! comes from the `ports::clock::Clock` trait and is sampled exactly once
//! per order-creation request, then threaded through the pipeline so entry
//! and expiry are always computed from the same instant.

use crate::domain::error::EngineError;

/// Integer seconds since the Unix epoch.
pub type EpochSeconds = i64;

/// Seconds in one price candle.
pub const CANDLE_SECS: i64 = 60;

/// Maximum tolerated skew between a caller-supplied timestamp and the
/// engine clock (guards against replay and drifted clients).
pub const SANE_RANGE_SECS: i64 = 3600;

/// Seconds remaining in the candle containing `t`, in `[1, 60]`.
///
/// A timestamp sitting exactly on a minute boundary has a full minute
/// remaining, so the result is 60, never 0.
pub fn remaining_seconds_in_minute(t: EpochSeconds) -> i64 {
    CANDLE_SECS - t.rem_euclid(CANDLE_SECS)
}

/// The next minute boundary strictly after `t`.
///
/// Always greater than `t` by an amount in `(0, 60]`.
pub fn end_of_current_minute(t: EpochSeconds) -> EpochSeconds {
    t + remaining_seconds_in_minute(t)
}

/// Whether `t` lies within one hour of the engine clock reading `now`.
pub fn is_within_sane_range(t: EpochSeconds, now: EpochSeconds) -> bool {
    (t - now).abs() <= SANE_RANGE_SECS
}

/// Ingest a raw floating timestamp from a legacy or wire boundary.
///
/// Internal representation is integer seconds; anything non-finite or
/// fractional is rejected rather than silently truncated.
pub fn timestamp_from_f64(raw: f64) -> Result<EpochSeconds, EngineError> {
    if !raw.is_finite() {
        return Err(EngineError::InvalidTimestamp(format!(
            "non-finite value {raw}"
        )));
    }
    if raw.fract() != 0.0 {
        return Err(EngineError::InvalidTimestamp(format!(
            "fractional seconds not allowed: {raw}"
        )));
    }
    if raw < i64::MIN as f64 || raw > i64::MAX as f64 {
        return Err(EngineError::InvalidTimestamp(format!(
            "out of range: {raw}"
        )));
    }
    Ok(raw as EpochSeconds)
}
