//! The order record and its settlement lifecycle.
//!
//! An order is created once — entry and expiry timestamps frozen at that
//! point — stays `Pending` until the wall clock reaches its expiry, and
//! transitions to a terminal outcome exactly once. Once terminal it is
//! immutable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::clock::EpochSeconds;
use crate::domain::duration::TradeDuration;
use crate::domain::error::EngineError;
use crate::domain::expiry::ScheduledExpiry;
use crate::domain::outcome::{self, Direction, Outcome};
use crate::domain::payout;

/// Asset symbol used at the ports boundary.
pub type AssetId = String;

/// A binary-option order, owned by the settlement pipeline for its
/// whole lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Internal order ID.
    pub id: Uuid,
    /// Asset this order wagers on.
    pub asset: AssetId,
    /// CALL or PUT.
    pub direction: Direction,
    /// Amount staked (positive).
    pub stake: Decimal,
    /// Profit rate in percent at the time of creation.
    pub profit_rate_percent: Decimal,
    /// Requested duration, resolved against the asset catalog.
    pub duration: TradeDuration,
    /// Entry timestamp, epoch seconds. Frozen at creation.
    pub entry_timestamp: EpochSeconds,
    /// Expiry timestamp, epoch seconds. Always minute-aligned.
    pub expiry_timestamp: EpochSeconds,
    /// Whether the entry landed inside the end-of-candle threshold.
    pub near_candle_close: bool,
    /// Price at entry.
    pub entry_price: Decimal,
    /// Price at expiry; absent until settlement.
    pub exit_price: Option<Decimal>,
    /// PENDING until settled, then WON or LOST.
    pub outcome: Outcome,
    /// Payout amount; defined iff the outcome is terminal.
    pub payout: Option<Decimal>,
    /// Wall-clock creation time, for audit.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new pending order from validated inputs and a computed
    /// schedule.
    pub fn new(
        asset: AssetId,
        direction: Direction,
        stake: Decimal,
        profit_rate_percent: Decimal,
        duration: TradeDuration,
        entry_timestamp: EpochSeconds,
        schedule: ScheduledExpiry,
        entry_price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset,
            direction,
            stake,
            profit_rate_percent,
            duration,
            entry_timestamp,
            expiry_timestamp: schedule.expiry,
            near_candle_close: schedule.near_candle_close,
            entry_price,
            exit_price: None,
            outcome: Outcome::Pending,
            payout: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the order has reached a terminal outcome.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Whether the order is due for settlement at `now`.
    pub fn is_due(&self, now: EpochSeconds) -> bool {
        !self.is_terminal() && now >= self.expiry_timestamp
    }

    /// Settles the order with the exit price, exactly once.
    ///
    /// Sets exit price, outcome, and payout atomically. A second call is
    /// `DoubleSettlement` and leaves the record untouched — a terminal
    /// outcome is never overwritten.
    pub fn settle(&mut self, exit_price: Decimal) -> Result<Outcome, EngineError> {
        if self.is_terminal() {
            return Err(EngineError::DoubleSettlement(self.id));
        }
        let outcome = outcome::resolve(self.direction, self.entry_price, exit_price);
        self.exit_price = Some(exit_price);
        self.outcome = outcome;
        self.payout = Some(payout::payout(self.stake, self.profit_rate_percent, outcome));
        Ok(outcome)
    }
}
