//! Usecases Layer - Orchestration of the Domain Core
//!
//! - `placement`: validates an order request, samples the clock once,
//!   schedules the expiry, and persists the pending order
//! - `settlement`: resolves due orders exactly once and aggregates a
//!   sweep report

pub mod placement;
pub mod settlement;

pub use placement::{AssetTradingRules, OrderPlacer, OrderRequest};
pub use settlement::{SettlementEngine, SettlementReport, SettlementResult};
