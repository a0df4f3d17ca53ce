//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`. Asset trading
//! rules (allowed durations, stake bounds, profit rates) are externalized
//! here - nothing is hardcoded in the domain layer. Durations arrive in
//! the legacy fractional-minute representation and are snapped to whole
//! seconds at ingestion.

pub mod loader;

use std::collections::HashMap;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::duration::DurationCatalog;
use crate::usecases::placement::AssetTradingRules;

/// Top-level engine configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the engine begins operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Engine identity and timing parameters.
  pub engine: EngineConfig,
  /// Per-asset trading rules.
  pub assets: Vec<AssetConfig>,
  /// Persistence configuration.
  #[serde(default)]
  pub persistence: PersistenceConfig,
}

/// Engine identity and timing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
  /// Human-readable engine name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Enable dry-run mode (in-memory persistence only).
  #[serde(default)]
  pub dry_run: bool,
  /// Seconds before a candle close within which an entry is flagged
  /// "near the candle close". Audit-only; does not move the schedule.
  #[serde(default = "default_threshold")]
  pub end_of_candle_threshold_secs: i64,
  /// Display timezone offset from UTC in hours (platform default +7).
  #[serde(default = "default_utc_offset")]
  pub utc_offset_hours: i32,
}

/// Individual asset configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
  /// Asset symbol, e.g. "BTCUSD".
  pub symbol: String,
  /// Allowed trade durations in legacy fractional minutes
  /// (a 1-second trade is ~0.0167).
  pub allowed_durations_minutes: Vec<f64>,
  /// Minimum stake, inclusive.
  pub min_stake: Decimal,
  /// Maximum stake, inclusive.
  pub max_stake: Decimal,
  /// Profit rate percent paid on a win.
  pub profit_rate_percent: Decimal,
  /// Whether this asset is currently tradable.
  #[serde(default = "default_true")]
  pub active: bool,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// Directory for JSONL settlement logs.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
  /// Settlement sweep interval (seconds).
  #[serde(default = "default_sweep_interval")]
  pub sweep_interval_seconds: u64,
}

impl Default for PersistenceConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
      sweep_interval_seconds: default_sweep_interval(),
    }
  }
}

impl AppConfig {
  /// Build the engine-facing per-asset rule map from active assets.
  pub fn trading_rules(&self) -> Result<HashMap<String, AssetTradingRules>> {
    let mut rules = HashMap::new();
    for asset in self.assets.iter().filter(|a| a.active) {
      let catalog = DurationCatalog::from_legacy_minutes(&asset.allowed_durations_minutes)
        .with_context(|| format!("Invalid duration catalog for {}", asset.symbol))?;
      rules.insert(
        asset.symbol.clone(),
        AssetTradingRules {
          catalog,
          min_stake: asset.min_stake,
          max_stake: asset.max_stake,
          profit_rate_percent: asset.profit_rate_percent,
        },
      );
    }
    Ok(rules)
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}

fn default_threshold() -> i64 {
  20
}

fn default_utc_offset() -> i32 {
  7
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_sweep_interval() -> u64 {
  1
}
