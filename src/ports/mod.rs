//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `Clock`: canonical "now", injected so tests supply fixed instants
//! - `PriceFeed`: entry/exit prices keyed by asset and timestamp
//! - `OrderRepository`: order persistence across the lifecycle

pub mod clock;
pub mod price_feed;
pub mod repository;
