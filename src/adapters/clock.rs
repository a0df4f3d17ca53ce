//! Clock adapters.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::clock::EpochSeconds;
use crate::ports::clock::Clock;

/// Wall-clock time source backed by chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> EpochSeconds {
        chrono::Utc::now().timestamp()
    }
}

/// Deterministic clock pinned to an explicit instant.
///
/// Used by tests and dry runs; `advance_to` moves the instant forward so a
/// lifecycle can be replayed step by step.
#[derive(Debug)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    /// Create a clock pinned to `now`.
    pub fn new(now: EpochSeconds) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Move the clock to a new instant.
    pub fn advance_to(&self, now: EpochSeconds) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> EpochSeconds {
        self.now.load(Ordering::SeqCst)
    }
}
