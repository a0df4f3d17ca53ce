//! Repository Port - Order Persistence Interface
//!
//! Defines the trait for persisting orders across their lifecycle and the
//! audit record appended when an order settles. The persistence substrate
//! delivers the settlement trigger at-least-once; the engine's
//! exactly-once guarantee comes from checking order state before
//! resolving, never from the storage layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::clock::EpochSeconds;
use crate::domain::order::Order;

/// A settled-order audit row (JSONL persistence).
///
/// Flat, stringly-typed snapshot of a terminal order: self-contained per
/// line so the audit trail can be parsed, streamed, and replayed without
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRecord {
  /// Order identifier.
  pub order_id: Uuid,
  /// Asset symbol.
  pub asset: String,
  /// CALL or PUT.
  pub direction: String,
  /// Amount staked.
  pub stake: String,
  /// Profit rate percent at creation.
  pub profit_rate_percent: String,
  /// Entry timestamp (epoch seconds).
  pub entry_timestamp: EpochSeconds,
  /// Expiry timestamp (epoch seconds, minute-aligned).
  pub expiry_timestamp: EpochSeconds,
  /// Price at entry.
  pub entry_price: String,
  /// Price at expiry.
  pub exit_price: String,
  /// WON or LOST.
  pub outcome: String,
  /// Amount paid out.
  pub payout: String,
  /// Whether the entry was flagged near the candle close.
  pub near_candle_close: bool,
}

impl SettlementRecord {
  /// Builds an audit row from a terminal order.
  ///
  /// Decimal fields are serialized as strings so the log is immune to
  /// float re-parsing drift.
  pub fn from_order(order: &Order) -> Self {
    Self {
      order_id: order.id,
      asset: order.asset.clone(),
      direction: order.direction.to_string(),
      stake: order.stake.to_string(),
      profit_rate_percent: order.profit_rate_percent.to_string(),
      entry_timestamp: order.entry_timestamp,
      expiry_timestamp: order.expiry_timestamp,
      entry_price: order.entry_price.to_string(),
      exit_price: order
        .exit_price
        .map(|p| p.to_string())
        .unwrap_or_default(),
      outcome: order.outcome.to_string(),
      payout: order.payout.map(|p| p.to_string()).unwrap_or_default(),
      near_candle_close: order.near_candle_close,
    }
  }
}

/// Trait for order persistence providers.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
  /// Persist a newly created pending order.
  async fn insert(&self, order: &Order) -> anyhow::Result<()>;

  /// Fetch an order by ID.
  async fn get(&self, id: Uuid) -> anyhow::Result<Option<Order>>;

  /// Persist the terminal state of a settled order.
  async fn update(&self, order: &Order) -> anyhow::Result<()>;

  /// Pending orders whose expiry is at or before `now`.
  async fn due_for_settlement(&self, now: EpochSeconds) -> anyhow::Result<Vec<Order>>;

  /// Check if the repository is healthy (disk space, permissions).
  async fn is_healthy(&self) -> bool;
}
