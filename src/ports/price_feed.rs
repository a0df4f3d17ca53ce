//! Price Feed Port - Entry and Exit Price Interface
//!
//! The engine never generates prices. A collaborator supplies the entry
//! price at order creation and an exit price at or after the computed
//! expiry, keyed by asset symbol. Transport details (WebSocket, polling,
//! candle store) live behind this trait.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::clock::EpochSeconds;

#[cfg(test)]
use mockall::automock;

/// Trait for price providers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PriceFeed: Send + Sync + 'static {
  /// Price of `asset` at (or for exit prices, at-or-after) `timestamp`.
  ///
  /// For settlement the caller passes the order's expiry timestamp; the
  /// feed returns the close of the candle ending there.
  async fn price_at(&self, asset: &str, timestamp: EpochSeconds) -> anyhow::Result<Decimal>;
}
