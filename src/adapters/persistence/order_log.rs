//! Settlement audit log - Append-only JSONL records.
//!
//! Persists one `SettlementRecord` per settled order to daily JSONL files
//! named `settlements/YYYY-MM-DD.jsonl`. Each line is a self-contained
//! JSON object, so the audit trail can be streamed, grepped, and replayed
//! without the engine, and a partial write never corrupts earlier lines.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

use crate::ports::repository::SettlementRecord;

/// Append-only JSONL settlement logger with daily file rotation.
pub struct SettlementLog {
    /// Base directory for settlement files.
    settlements_dir: PathBuf,
}

impl SettlementLog {
    /// Create a new settlement log under the given data directory.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let settlements_dir = Path::new(data_dir).join("settlements");

        fs::create_dir_all(&settlements_dir)
            .await
            .context("Failed to create settlements directory")?;

        Ok(Self { settlements_dir })
    }

    /// Append a settlement record to today's JSONL file.
    #[instrument(skip(self, record), fields(order_id = %record.order_id))]
    pub async fn append(&self, record: &SettlementRecord) -> Result<()> {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let path = self.settlements_dir.join(format!("{date}.jsonl"));

        let mut json = serde_json::to_string(record)
            .context("Failed to serialize settlement record")?;
        json.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .context("Failed to open settlement log file")?;

        file.write_all(json.as_bytes())
            .await
            .context("Failed to write settlement record")?;

        file.flush().await.context("Failed to flush settlement log")?;

        Ok(())
    }

    /// Load all settlement records from all daily files.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Result<Vec<SettlementRecord>> {
        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.settlements_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "jsonl") {
                let content = fs::read_to_string(&path).await?;
                for line in content.lines() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<SettlementRecord>(line) {
                        Ok(record) => records.push(record),
                        Err(e) => {
                            tracing::warn!(
                                file = %path.display(),
                                error = %e,
                                "Skipping malformed settlement record"
                            );
                        }
                    }
                }
            }
        }

        records.sort_by_key(|r| r.expiry_timestamp);
        info!(count = records.len(), "Loaded settlement records");
        Ok(records)
    }

    /// Check if the settlements directory is writable.
    pub async fn is_healthy(&self) -> bool {
        let test_path = self.settlements_dir.join(".health_check");
        let result = fs::write(&test_path, b"ok").await;
        let _ = fs::remove_file(&test_path).await;
        result.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::domain::clock::EpochSeconds;
    use crate::domain::duration::TradeDuration;
    use crate::domain::expiry::compute_expiry_default;
    use crate::domain::order::Order;
    use crate::domain::outcome::Direction;

    const NOON: EpochSeconds = 28_000_000 * 60;

    fn settled_order() -> Order {
        let duration = TradeDuration::from_minutes(1).unwrap();
        let entry = NOON + 45;
        let mut order = Order::new(
            "BTCUSD".to_string(),
            Direction::Call,
            dec!(10000),
            dec!(85),
            duration,
            entry,
            compute_expiry_default(entry, duration),
            dec!(42000),
        );
        order.settle(dec!(42001)).unwrap();
        order
    }

    fn scratch_dir() -> String {
        std::env::temp_dir()
            .join(format!("binopt-log-test-{}", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned()
    }

    #[tokio::test]
    async fn test_append_and_load_round_trip() {
        let dir = scratch_dir();
        let log = SettlementLog::new(&dir).await.unwrap();

        let order = settled_order();
        let record = SettlementRecord::from_order(&order);
        log.append(&record).await.unwrap();
        log.append(&record).await.unwrap();

        let loaded = log.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].order_id, order.id);
        assert_eq!(loaded[0].outcome, "WON");
        assert_eq!(loaded[0].payout, "18500");

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_health_check() {
        let dir = scratch_dir();
        let log = SettlementLog::new(&dir).await.unwrap();
        assert!(log.is_healthy().await);
        let _ = fs::remove_dir_all(&dir).await;
    }
}
