//! Expiry scheduling — the candle alignment algorithm.
//!
//! Given an entry timestamp and a validated duration, computes the exact
//! timestamp at which the order resolves. The schedule always rounds up to
//! the next whole-minute candle boundary before adding the duration; it
//! never starts counting mid-candle, so every expiry lands on a boundary.

use serde::{Deserialize, Serialize};

use crate::domain::clock::{self, EpochSeconds};
use crate::domain::duration::TradeDuration;

/// Default number of seconds before a candle close within which an entry
/// counts as "near the candle close".
pub const DEFAULT_END_OF_CANDLE_THRESHOLD_SECS: i64 = 20;

/// Result of scheduling an order's expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledExpiry {
    /// The first whole-minute boundary strictly after the entry.
    pub candle_boundary: EpochSeconds,
    /// The settlement timestamp. Always minute-aligned.
    pub expiry: EpochSeconds,
    /// Whether the entry landed within the end-of-candle threshold.
    ///
    /// Surfaced for audit only. Near-close entries currently schedule
    /// identically to any other entry with the same residual; both branches
    /// of the legacy algorithm compute the same result, and that parity is
    /// preserved here. Changing it changes when real-money trades resolve.
    pub near_candle_close: bool,
}

/// Computes the candle-aligned expiry for an order.
///
/// Steps:
/// 1. `remaining = 60 − (entry mod 60)`, in `[1, 60]`.
/// 2. `candle_boundary = entry + remaining`.
/// 3. `expiry = candle_boundary + whole_minutes(duration) · 60`.
///
/// A sub-minute duration contributes zero whole minutes, so it resolves at
/// the candle boundary itself; settlement granularity is one candle.
pub fn compute_expiry(
    entry: EpochSeconds,
    duration: TradeDuration,
    threshold_secs: i64,
) -> ScheduledExpiry {
    let remaining = clock::remaining_seconds_in_minute(entry);
    let candle_boundary = entry + remaining;
    let near_candle_close = remaining <= threshold_secs;

    let expiry = candle_boundary + i64::from(duration.whole_minutes()) * 60;

    ScheduledExpiry {
        candle_boundary,
        expiry,
        near_candle_close,
    }
}

/// `compute_expiry` with the default end-of-candle threshold.
pub fn compute_expiry_default(entry: EpochSeconds, duration: TradeDuration) -> ScheduledExpiry {
    compute_expiry(entry, duration, DEFAULT_END_OF_CANDLE_THRESHOLD_SECS)
}
