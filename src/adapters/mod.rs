//! Adapters Layer - Port Implementations
//!
//! Concrete implementations of the ports:
//! - `clock`: system wall clock and a fixed clock for deterministic tests
//! - `persistence`: in-memory order store and JSONL settlement audit log

pub mod clock;
pub mod persistence;
