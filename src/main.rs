//! Binary-Option Settlement Engine — Entry Point
//!
//! Initializes configuration, logging, persistence, and the settlement
//! sweep loop. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create persistence adapters (in-memory repository + JSONL audit log)
//! 4. Build OrderPlacer and SettlementEngine over the system clock
//! 5. Spawn the settlement sweep loop on the configured interval
//! 6. Wait for SIGINT → graceful shutdown

use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::clock::SystemClock;
use adapters::persistence::memory::MemoryOrderRepository;
use adapters::persistence::order_log::SettlementLog;
use domain::clock::EpochSeconds;
use ports::price_feed::PriceFeed;
use ports::repository::{OrderRepository, SettlementRecord};
use usecases::placement::OrderPlacer;
use usecases::settlement::SettlementEngine;

/// Placeholder feed used until a live price-feed adapter is bridged in.
///
/// Always reports "unavailable", so due orders stay pending instead of
/// settling against fabricated prices.
struct UnbridgedFeed;

#[async_trait::async_trait]
impl PriceFeed for UnbridgedFeed {
    async fn price_at(&self, asset: &str, timestamp: EpochSeconds) -> anyhow::Result<Decimal> {
        anyhow::bail!("no price feed bridged for {asset} at {timestamp}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.engine.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.engine.name,
        version = env!("CARGO_PKG_VERSION"),
        dry_run = config.engine.dry_run,
        assets = config.assets.len(),
        "Starting settlement engine"
    );

    // ── 3. Shutdown signal channel ──────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Persistence adapters ─────────────────────────────
    let repo = Arc::new(MemoryOrderRepository::new());
    let audit_log = Arc::new(
        SettlementLog::new(&config.persistence.data_dir)
            .await
            .context("Failed to create settlement log")?,
    );
    if !audit_log.is_healthy().await {
        warn!("Settlement log directory not writable");
    }

    // ── 5. Build usecases over the system clock ─────────────
    let rules = config.trading_rules()?;
    let _placer = OrderPlacer::new(
        SystemClock,
        Arc::clone(&repo),
        rules,
        config.engine.end_of_candle_threshold_secs,
    );
    let settlement = Arc::new(SettlementEngine::new(
        SystemClock,
        UnbridgedFeed,
        Arc::clone(&repo),
    ));

    // ── 6. Spawn the settlement sweep loop ──────────────────
    let sweep_shutdown = shutdown_tx.subscribe();
    let sweep_interval = config.persistence.sweep_interval_seconds;
    let sweep_handle = tokio::spawn(run_sweep_loop(
        Arc::clone(&settlement),
        Arc::clone(&audit_log),
        Arc::clone(&repo),
        sweep_interval,
        sweep_shutdown,
    ));

    info!("Settlement sweep loop running — awaiting price feed bridge for live settlement");

    // ── 7. Wait for SIGINT ──────────────────────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
    }

    let _ = shutdown_tx.send(());
    let _ = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        sweep_handle,
    )
    .await;

    info!("Shutdown complete");
    Ok(())
}

/// Periodic settlement sweep with audit logging.
///
/// The external trigger contract is at-least-once; the engine's
/// pending-state check keeps each resolution exactly-once, so a sweep
/// racing a direct `settle_order` call is harmless.
async fn run_sweep_loop(
    settlement: Arc<SettlementEngine<SystemClock, UnbridgedFeed, MemoryOrderRepository>>,
    audit_log: Arc<SettlementLog>,
    repo: Arc<MemoryOrderRepository>,
    interval_secs: u64,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
    loop {
        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => {
                info!("Sweep loop received shutdown signal");
                break;
            }
            _ = ticker.tick() => {
                match settlement.settle_due().await {
                    Ok(report) => {
                        for result in report.results.iter().filter(|r| r.success) {
                            if let Ok(Some(order)) = repo.get(result.order_id).await {
                                let record = SettlementRecord::from_order(&order);
                                if let Err(e) = audit_log.append(&record).await {
                                    error!(
                                        order_id = %result.order_id,
                                        error = %e,
                                        "Failed to append audit record"
                                    );
                                }
                            }
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Settlement sweep failed");
                    }
                }
            }
        }
    }
}
