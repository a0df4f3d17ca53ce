//! Persistence adapters.
//!
//! The engine treats persistence as a collaborator behind the
//! `OrderRepository` port. Provided here: an in-memory store for tests and
//! dry runs, and an append-only JSONL audit log of settled orders.

pub mod memory;
pub mod order_log;

pub use memory::MemoryOrderRepository;
pub use order_log::SettlementLog;
