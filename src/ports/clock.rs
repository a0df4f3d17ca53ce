//! Clock Port - Injected Time Source
//!
//! "Now" is the engine's one piece of ambient state. It is injected via
//! this trait rather than read from a hidden global, sampled exactly once
//! per order-creation request, and threaded explicitly through the rest of
//! the computation so entry and expiry always agree.

use crate::domain::clock::EpochSeconds;

/// Canonical second-resolution time source.
pub trait Clock: Send + Sync + 'static {
  /// Integer seconds since the Unix epoch.
  fn now(&self) -> EpochSeconds;
}
