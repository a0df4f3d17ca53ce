//! Engine error kinds.
//!
//! Every validation failure is synchronous and rejects the operation before
//! any persistence happens — there is no partial order state. Ports and
//! usecases carry these inside `anyhow::Error`, so callers at the API
//! boundary can downcast to distinguish the kinds.

use rust_decimal::Decimal;
use uuid::Uuid;

/// Errors produced by the order timing and settlement core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Timestamp input was non-finite, fractional, or outside the sane
    /// range around the current clock reading.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// No allowed duration lies within tolerance of the requested value.
    #[error("duration {requested_minutes} min has no catalog entry within tolerance")]
    InvalidDuration { requested_minutes: f64 },

    /// Direction string was not CALL or PUT.
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    /// Stake falls outside the asset's configured bounds.
    #[error("stake {stake} outside allowed range [{min}, {max}]")]
    StakeOutOfRange {
        stake: Decimal,
        min: Decimal,
        max: Decimal,
    },

    /// Attempt to resolve an order whose outcome is already terminal.
    /// Integration error at the call site: the caller failed to check
    /// order state before invoking settlement.
    #[error("order {0} is already settled")]
    DoubleSettlement(Uuid),

    /// No trading configuration exists for the requested asset.
    #[error("unknown asset: {0:?}")]
    UnknownAsset(String),
}
