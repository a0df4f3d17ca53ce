//! Domain layer - Core timing and settlement logic.
//!
//! This module contains the pure deterministic core of the engine.
//! No I/O and no shared mutable state here (hexagonal architecture inner
//! ring): every function is pure over explicit inputs, including time,
//! which is threaded in as a parameter. All types are serializable and
//! testable in isolation.

pub mod clock;
pub mod display;
pub mod duration;
pub mod error;
pub mod expiry;
pub mod order;
pub mod outcome;
pub mod payout;

// Re-export core types for convenience
pub use clock::EpochSeconds;
pub use duration::{DurationCatalog, TradeDuration};
pub use error::EngineError;
pub use expiry::{ScheduledExpiry, compute_expiry, compute_expiry_default};
pub use order::{AssetId, Order};
pub use outcome::{Direction, Outcome, resolve};
