//! Settlement - Exactly-Once Resolution of Due Orders
//!
//! Settlement flow:
//! 1. Load pending orders whose expiry is at or before now
//! 2. Fetch the exit price at each order's expiry from the price feed
//! 3. Resolve outcome and payout, persist the terminal order
//! 4. Aggregate a sweep report
//!
//! The external trigger (timer, polling job, queue) delivers at-least-once;
//! the pending-state check inside `Order::settle` makes resolution
//! exactly-once. A terminal order is never recomputed or overwritten.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::error::EngineError;
use crate::domain::order::Order;
use crate::domain::outcome::Outcome;
use crate::ports::clock::Clock;
use crate::ports::price_feed::PriceFeed;
use crate::ports::repository::OrderRepository;

/// Result of settling a single order.
#[derive(Debug, Clone)]
pub struct SettlementResult {
  /// Order identifier.
  pub order_id: Uuid,
  /// Terminal outcome, if settlement succeeded.
  pub outcome: Option<Outcome>,
  /// Amount paid out (zero on loss or failure).
  pub payout: Decimal,
  /// Whether settlement succeeded.
  pub success: bool,
  /// Error message if settlement failed.
  pub error: Option<String>,
}

/// Aggregated report from a settlement sweep.
#[derive(Debug, Clone)]
pub struct SettlementReport {
  /// Individual settlement results.
  pub results: Vec<SettlementResult>,
  /// Orders settled as WON.
  pub won: usize,
  /// Orders settled as LOST.
  pub lost: usize,
  /// Orders that failed settlement (feed or storage errors).
  pub failed: usize,
  /// Total paid out across winning orders.
  pub total_paid_out: Decimal,
  /// Timestamp of the sweep.
  pub timestamp: DateTime<Utc>,
}

/// Resolves due orders against the price feed, exactly once each.
pub struct SettlementEngine<C: Clock, P: PriceFeed, R: OrderRepository> {
  clock: C,
  feed: P,
  repo: Arc<R>,
}

impl<C: Clock, P: PriceFeed, R: OrderRepository> SettlementEngine<C, P, R> {
  /// Create a new settlement engine.
  pub fn new(clock: C, feed: P, repo: Arc<R>) -> Self {
    Self { clock, feed, repo }
  }

  /// Run a settlement sweep over every due order.
  #[instrument(skip(self))]
  pub async fn settle_due(&self) -> Result<SettlementReport> {
    let now = self.clock.now();
    let due = self
      .repo
      .due_for_settlement(now)
      .await
      .context("Failed to load due orders")?;

    info!(now, due = due.len(), "Starting settlement sweep");

    let mut results = Vec::with_capacity(due.len());
    for mut order in due {
      results.push(self.settle_one(&mut order).await);
    }

    let won = results
      .iter()
      .filter(|r| r.outcome == Some(Outcome::Won))
      .count();
    let lost = results
      .iter()
      .filter(|r| r.outcome == Some(Outcome::Lost))
      .count();
    let failed = results.iter().filter(|r| !r.success).count();
    let total_paid_out: Decimal = results
      .iter()
      .filter(|r| r.success)
      .map(|r| r.payout)
      .sum();

    let report = SettlementReport {
      results,
      won,
      lost,
      failed,
      total_paid_out,
      timestamp: Utc::now(),
    };

    info!(
      won = report.won,
      lost = report.lost,
      failed = report.failed,
      total_paid_out = %report.total_paid_out,
      "Settlement sweep complete"
    );

    Ok(report)
  }

  /// Settle a single order by ID.
  ///
  /// Rejects orders that are not yet due or already terminal; the caller
  /// must treat `DoubleSettlement` as an integration error.
  #[instrument(skip(self), fields(order_id = %id))]
  pub async fn settle_order(&self, id: Uuid) -> Result<SettlementResult> {
    let mut order = self
      .repo
      .get(id)
      .await
      .context("Failed to load order")?
      .with_context(|| format!("Order {id} not found"))?;

    if order.is_terminal() {
      return Err(EngineError::DoubleSettlement(id).into());
    }

    let now = self.clock.now();
    anyhow::ensure!(
      now >= order.expiry_timestamp,
      "Order {id} not due until {} (now {now})",
      order.expiry_timestamp
    );

    let result = self.settle_one(&mut order).await;
    Ok(result)
  }

  /// Resolve one due order and persist its terminal state.
  async fn settle_one(&self, order: &mut Order) -> SettlementResult {
    // At-least-once trigger delivery: a terminal order in the batch is
    // skipped, never recomputed.
    if order.is_terminal() {
      warn!(order_id = %order.id, "Skipping already-settled order in sweep");
      return SettlementResult {
        order_id: order.id,
        outcome: None,
        payout: Decimal::ZERO,
        success: false,
        error: Some("already settled".to_string()),
      };
    }

    let exit_price = match self.feed.price_at(&order.asset, order.expiry_timestamp).await {
      Ok(price) => price,
      Err(e) => {
        warn!(
          order_id = %order.id,
          asset = %order.asset,
          error = %e,
          "Exit price unavailable, order stays pending"
        );
        return SettlementResult {
          order_id: order.id,
          outcome: None,
          payout: Decimal::ZERO,
          success: false,
          error: Some(format!("exit price unavailable: {e}")),
        };
      }
    };

    let outcome = match order.settle(exit_price) {
      Ok(outcome) => outcome,
      Err(e) => {
        error!(order_id = %order.id, error = %e, "Settlement rejected");
        return SettlementResult {
          order_id: order.id,
          outcome: None,
          payout: Decimal::ZERO,
          success: false,
          error: Some(e.to_string()),
        };
      }
    };

    let payout = order.payout.unwrap_or(Decimal::ZERO);

    if let Err(e) = self.repo.update(order).await {
      error!(order_id = %order.id, error = %e, "Failed to persist settled order");
      return SettlementResult {
        order_id: order.id,
        outcome: Some(outcome),
        payout,
        success: false,
        error: Some(format!("persist failed: {e}")),
      };
    }

    info!(
      order_id = %order.id,
      outcome = %outcome,
      exit_price = %exit_price,
      payout = %payout,
      "Order settled"
    );

    SettlementResult {
      order_id: order.id,
      outcome: Some(outcome),
      payout,
      success: true,
      error: None,
    }
  }
}
