//! Order Placement - Validation, Scheduling, Persistence
//!
//! Turns a raw order request into a persisted PENDING order:
//! - Sample the clock exactly once and thread the instant through
//! - Validate timestamp sanity, asset, stake bounds, and duration
//! - Compute the candle-aligned expiry
//! - Persist before returning
//!
//! Every validation failure is synchronous and precedes persistence;
//! there is no partial order state to clean up.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::domain::clock;
use crate::domain::duration::DurationCatalog;
use crate::domain::error::EngineError;
use crate::domain::expiry;
use crate::domain::order::{AssetId, Order};
use crate::domain::outcome::Direction;
use crate::ports::clock::Clock;
use crate::ports::repository::OrderRepository;

/// Per-asset trading rules, resolved from configuration at startup.
#[derive(Debug, Clone)]
pub struct AssetTradingRules {
  /// Allowed trade durations.
  pub catalog: DurationCatalog,
  /// Minimum stake, inclusive.
  pub min_stake: Decimal,
  /// Maximum stake, inclusive.
  pub max_stake: Decimal,
  /// Profit rate percent paid on a win.
  pub profit_rate_percent: Decimal,
}

/// A raw order request from the API boundary.
#[derive(Debug, Clone)]
pub struct OrderRequest {
  /// Asset symbol.
  pub asset: AssetId,
  /// CALL or PUT (parsed upstream via `Direction::from_str`).
  pub direction: Direction,
  /// Amount staked.
  pub stake: Decimal,
  /// Requested duration in legacy fractional minutes.
  pub duration_minutes: f64,
  /// Price at entry, supplied by the price feed collaborator.
  pub entry_price: Decimal,
  /// Caller-supplied entry timestamp in raw legacy form; `None` means
  /// "now".
  ///
  /// Legacy clients send epoch seconds as a floating number. When present
  /// it must be a whole finite value and sit within the sane range of the
  /// engine clock, guarding against skewed clients and replays.
  pub entry_timestamp: Option<f64>,
}

/// Creates pending orders with frozen entry/expiry timestamps.
pub struct OrderPlacer<C: Clock, R: OrderRepository> {
  clock: C,
  repo: Arc<R>,
  assets: HashMap<AssetId, AssetTradingRules>,
  end_of_candle_threshold_secs: i64,
}

impl<C: Clock, R: OrderRepository> OrderPlacer<C, R> {
  /// Create a new placer over the given asset rules.
  pub fn new(
    clock: C,
    repo: Arc<R>,
    assets: HashMap<AssetId, AssetTradingRules>,
    end_of_candle_threshold_secs: i64,
  ) -> Self {
    Self {
      clock,
      repo,
      assets,
      end_of_candle_threshold_secs,
    }
  }

  /// Validate a request and persist a new PENDING order.
  ///
  /// The clock is sampled once at the top; every downstream calculation
  /// sees that single instant.
  #[instrument(skip(self, request), fields(asset = %request.asset, direction = %request.direction))]
  pub async fn place(&self, request: OrderRequest) -> Result<Order> {
    let now = self.clock.now();

    let entry_timestamp = match request.entry_timestamp {
      Some(raw) => {
        let t = clock::timestamp_from_f64(raw)?;
        if !clock::is_within_sane_range(t, now) {
          return Err(
            EngineError::InvalidTimestamp(format!(
              "entry {t} more than an hour from engine clock {now}"
            ))
            .into(),
          );
        }
        t
      }
      None => now,
    };

    let rules = self
      .assets
      .get(&request.asset)
      .ok_or_else(|| EngineError::UnknownAsset(request.asset.clone()))?;

    if request.stake < rules.min_stake || request.stake > rules.max_stake {
      return Err(
        EngineError::StakeOutOfRange {
          stake: request.stake,
          min: rules.min_stake,
          max: rules.max_stake,
        }
        .into(),
      );
    }

    let duration = rules.catalog.validate(request.duration_minutes)?;

    let schedule = expiry::compute_expiry(
      entry_timestamp,
      duration,
      self.end_of_candle_threshold_secs,
    );
    debug!(
      entry = entry_timestamp,
      boundary = schedule.candle_boundary,
      expiry = schedule.expiry,
      near_close = schedule.near_candle_close,
      "Expiry scheduled"
    );

    let order = Order::new(
      request.asset,
      request.direction,
      request.stake,
      rules.profit_rate_percent,
      duration,
      entry_timestamp,
      schedule,
      request.entry_price,
    );

    self.repo.insert(&order).await?;

    info!(
      order_id = %order.id,
      expiry = order.expiry_timestamp,
      stake = %order.stake,
      "Order placed"
    );

    Ok(order)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  use crate::adapters::clock::FixedClock;
  use crate::adapters::persistence::memory::MemoryOrderRepository;
  use crate::domain::clock::EpochSeconds;
  use crate::domain::outcome::Outcome;

  const NOON: EpochSeconds = 28_000_000 * 60;

  fn placer(
    now: EpochSeconds,
  ) -> OrderPlacer<FixedClock, MemoryOrderRepository> {
    let rules = AssetTradingRules {
      catalog: DurationCatalog::from_legacy_minutes(&[0.0167, 1.0, 5.0]).unwrap(),
      min_stake: dec!(100),
      max_stake: dec!(50000),
      profit_rate_percent: dec!(85),
    };
    let mut assets = HashMap::new();
    assets.insert("BTCUSD".to_string(), rules);
    OrderPlacer::new(
      FixedClock::new(now),
      Arc::new(MemoryOrderRepository::new()),
      assets,
      expiry::DEFAULT_END_OF_CANDLE_THRESHOLD_SECS,
    )
  }

  fn request() -> OrderRequest {
    OrderRequest {
      asset: "BTCUSD".to_string(),
      direction: Direction::Call,
      stake: dec!(10000),
      duration_minutes: 1.0,
      entry_price: dec!(42000),
      entry_timestamp: None,
    }
  }

  #[tokio::test]
  async fn test_place_samples_clock_once_and_persists_pending() {
    let placer = placer(NOON + 45);
    let order = placer.place(request()).await.unwrap();

    assert_eq!(order.entry_timestamp, NOON + 45);
    assert_eq!(order.expiry_timestamp, NOON + 120);
    assert_eq!(order.outcome, Outcome::Pending);
    assert_eq!(order.profit_rate_percent, dec!(85));

    let stored = placer.repo.get(order.id).await.unwrap().unwrap();
    assert_eq!(stored.expiry_timestamp, order.expiry_timestamp);
  }

  #[tokio::test]
  async fn test_place_rejects_unknown_asset() {
    let placer = placer(NOON);
    let mut req = request();
    req.asset = "DOGEUSD".to_string();
    let err = placer.place(req).await.unwrap_err();
    assert!(matches!(
      err.downcast_ref::<EngineError>(),
      Some(EngineError::UnknownAsset(_))
    ));
  }

  #[tokio::test]
  async fn test_place_rejects_stake_out_of_range() {
    let placer = placer(NOON);
    let mut req = request();
    req.stake = dec!(50);
    let err = placer.place(req).await.unwrap_err();
    assert!(matches!(
      err.downcast_ref::<EngineError>(),
      Some(EngineError::StakeOutOfRange { .. })
    ));

    let mut req = request();
    req.stake = dec!(50001);
    assert!(placer.place(req).await.is_err());
  }

  #[tokio::test]
  async fn test_place_rejects_uncataloged_duration() {
    let placer = placer(NOON);
    let mut req = request();
    req.duration_minutes = 2.0;
    let err = placer.place(req).await.unwrap_err();
    assert!(matches!(
      err.downcast_ref::<EngineError>(),
      Some(EngineError::InvalidDuration { .. })
    ));
  }

  #[tokio::test]
  async fn test_place_rejects_skewed_entry_timestamp() {
    let placer = placer(NOON);
    let mut req = request();
    req.entry_timestamp = Some((NOON + 3601) as f64);
    let err = placer.place(req).await.unwrap_err();
    assert!(matches!(
      err.downcast_ref::<EngineError>(),
      Some(EngineError::InvalidTimestamp(_))
    ));
  }

  #[tokio::test]
  async fn test_place_rejects_fractional_entry_timestamp() {
    let placer = placer(NOON);
    let mut req = request();
    req.entry_timestamp = Some(NOON as f64 + 0.5);
    let err = placer.place(req).await.unwrap_err();
    assert!(matches!(
      err.downcast_ref::<EngineError>(),
      Some(EngineError::InvalidTimestamp(_))
    ));
  }

  #[tokio::test]
  async fn test_place_accepts_in_range_entry_timestamp() {
    let placer = placer(NOON);
    let mut req = request();
    req.entry_timestamp = Some((NOON + 1800) as f64);
    let order = placer.place(req).await.unwrap();
    assert_eq!(order.entry_timestamp, NOON + 1800);
  }

  #[tokio::test]
  async fn test_place_sub_minute_duration() {
    let placer = placer(NOON + 45);
    let mut req = request();
    req.duration_minutes = 0.0167;
    let order = placer.place(req).await.unwrap();
    // 1-second trade still settles at the candle boundary.
    assert_eq!(order.expiry_timestamp, NOON + 60);
    assert_eq!(order.duration.as_secs(), 1);
  }
}
