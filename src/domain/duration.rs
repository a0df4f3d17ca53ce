//! Trade durations and the per-asset allowed-duration catalog.
//!
//! Durations are stored as explicit whole seconds. Legacy configuration and
//! request payloads express them as fractional minutes (a 1-second trade
//! arrives as ~0.0167), so ingestion and validation compare with a small
//! tolerance instead of exact float equality.

use serde::{Deserialize, Serialize};

use crate::domain::error::EngineError;

/// Tolerance for matching legacy fractional-minute values, in minutes
/// (~6 ms). Wide enough to absorb float representation error, far too
/// narrow to conflate neighbouring catalog entries.
pub const LEGACY_TOLERANCE_MINUTES: f64 = 1e-4;

/// A trade duration in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeDuration(u32);

impl TradeDuration {
    /// Creates a duration from whole seconds. Zero is not a valid duration.
    pub fn from_secs(secs: u32) -> Option<Self> {
        (secs > 0).then_some(Self(secs))
    }

    /// Creates a duration from whole minutes.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::from_secs(minutes.checked_mul(60)?)
    }

    /// Duration in seconds.
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    /// Whole minutes contained in this duration.
    ///
    /// This is what the expiry scheduler consumes: a sub-minute duration
    /// contributes zero whole minutes, so its effective settlement
    /// granularity is one candle regardless of the nominal length.
    pub const fn whole_minutes(self) -> u32 {
        self.0 / 60
    }

    /// Duration expressed as fractional minutes, for comparison against
    /// legacy values.
    pub fn as_minutes_f64(self) -> f64 {
        f64::from(self.0) / 60.0
    }
}

impl std::fmt::Display for TradeDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// The enumerated set of durations an asset may be traded at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationCatalog {
    allowed: Vec<TradeDuration>,
}

impl DurationCatalog {
    /// Builds a catalog from explicit durations.
    pub fn new(allowed: Vec<TradeDuration>) -> Self {
        Self { allowed }
    }

    /// Ingests legacy fractional-minute values, snapping each to the
    /// nearest whole second.
    ///
    /// Rejects non-finite, non-positive, or sub-second values: the legacy
    /// representation is lossy but every real catalog entry is an exact
    /// number of seconds.
    pub fn from_legacy_minutes(values: &[f64]) -> Result<Self, EngineError> {
        let mut allowed = Vec::with_capacity(values.len());
        for &minutes in values {
            if !minutes.is_finite() || minutes <= 0.0 {
                return Err(EngineError::InvalidDuration {
                    requested_minutes: minutes,
                });
            }
            let secs = (minutes * 60.0).round();
            let duration = TradeDuration::from_secs(secs as u32).ok_or(
                EngineError::InvalidDuration {
                    requested_minutes: minutes,
                },
            )?;
            allowed.push(duration);
        }
        Ok(Self { allowed })
    }

    /// Whether a requested fractional-minute duration matches a catalog
    /// entry within tolerance.
    pub fn is_valid(&self, requested_minutes: f64) -> bool {
        self.lookup(requested_minutes).is_some()
    }

    /// Resolves a requested fractional-minute duration to its catalog
    /// entry, or rejects it.
    pub fn validate(&self, requested_minutes: f64) -> Result<TradeDuration, EngineError> {
        self.lookup(requested_minutes)
            .ok_or(EngineError::InvalidDuration { requested_minutes })
    }

    fn lookup(&self, requested_minutes: f64) -> Option<TradeDuration> {
        if !requested_minutes.is_finite() {
            return None;
        }
        self.allowed
            .iter()
            .copied()
            .find(|d| (d.as_minutes_f64() - requested_minutes).abs() < LEGACY_TOLERANCE_MINUTES)
    }

    /// Allowed durations, in catalog order.
    pub fn allowed(&self) -> &[TradeDuration] {
        &self.allowed
    }
}
