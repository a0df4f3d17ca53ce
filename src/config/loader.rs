//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    name = %config.engine.name,
    assets = config.assets.len(),
    threshold_secs = config.engine.end_of_candle_threshold_secs,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty asset definitions with positive stake bounds
/// - Profit rates in (0, 100]
/// - An end-of-candle threshold that fits inside one candle
/// - A representable timezone offset
pub fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.engine.name.is_empty(),
    "Engine name must not be empty"
  );
  anyhow::ensure!(
    (0..60).contains(&config.engine.end_of_candle_threshold_secs),
    "end_of_candle_threshold_secs must be in [0, 60), got {}",
    config.engine.end_of_candle_threshold_secs
  );
  anyhow::ensure!(
    (-12..=14).contains(&config.engine.utc_offset_hours),
    "utc_offset_hours must be in [-12, 14], got {}",
    config.engine.utc_offset_hours
  );

  anyhow::ensure!(
    !config.assets.is_empty(),
    "At least one asset must be configured"
  );

  for (i, asset) in config.assets.iter().enumerate() {
    anyhow::ensure!(
      !asset.symbol.is_empty(),
      "Asset {i} has empty symbol"
    );
    anyhow::ensure!(
      !asset.allowed_durations_minutes.is_empty(),
      "Asset {} has no allowed durations",
      asset.symbol
    );
    for &d in &asset.allowed_durations_minutes {
      anyhow::ensure!(
        d.is_finite() && d > 0.0,
        "Asset {} has invalid duration {d}",
        asset.symbol
      );
    }
    anyhow::ensure!(
      asset.min_stake > Decimal::ZERO,
      "Asset {} min_stake must be positive",
      asset.symbol
    );
    anyhow::ensure!(
      asset.max_stake >= asset.min_stake,
      "Asset {} max_stake {} below min_stake {}",
      asset.symbol,
      asset.max_stake,
      asset.min_stake
    );
    anyhow::ensure!(
      asset.profit_rate_percent > Decimal::ZERO
        && asset.profit_rate_percent <= Decimal::ONE_HUNDRED,
      "Asset {} profit_rate_percent must be in (0, 100], got {}",
      asset.symbol,
      asset.profit_rate_percent
    );
  }

  anyhow::ensure!(
    config.persistence.sweep_interval_seconds > 0,
    "sweep_interval_seconds must be positive"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{AssetConfig, EngineConfig, PersistenceConfig};
  use rust_decimal_macros::dec;

  fn valid_config() -> AppConfig {
    AppConfig {
      engine: EngineConfig {
        name: "binopt-engine".to_string(),
        log_level: "info".to_string(),
        dry_run: true,
        end_of_candle_threshold_secs: 20,
        utc_offset_hours: 7,
      },
      assets: vec![AssetConfig {
        symbol: "BTCUSD".to_string(),
        allowed_durations_minutes: vec![1.0, 5.0],
        min_stake: dec!(100),
        max_stake: dec!(50000),
        profit_rate_percent: dec!(85),
        active: true,
      }],
      persistence: PersistenceConfig::default(),
    }
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_valid_config_passes() {
    assert!(validate_config(&valid_config()).is_ok());
  }

  #[test]
  fn test_empty_assets_rejected() {
    let mut config = valid_config();
    config.assets.clear();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_threshold_out_of_candle_rejected() {
    let mut config = valid_config();
    config.engine.end_of_candle_threshold_secs = 60;
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_inverted_stake_bounds_rejected() {
    let mut config = valid_config();
    config.assets[0].max_stake = dec!(50);
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_profit_rate_bounds() {
    let mut config = valid_config();
    config.assets[0].profit_rate_percent = dec!(0);
    assert!(validate_config(&config).is_err());
    config.assets[0].profit_rate_percent = dec!(100.5);
    assert!(validate_config(&config).is_err());
    config.assets[0].profit_rate_percent = dec!(100);
    assert!(validate_config(&config).is_ok());
  }

  #[test]
  fn test_bad_duration_rejected() {
    let mut config = valid_config();
    config.assets[0].allowed_durations_minutes = vec![-1.0];
    assert!(validate_config(&config).is_err());
  }
}
