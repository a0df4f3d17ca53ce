//! In-memory order repository.
//!
//! Backs tests and dry runs. Orders are cloned on the way in and out so
//! the settlement pipeline's exclusive ownership of a live order is never
//! aliased by callers.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::clock::EpochSeconds;
use crate::domain::order::Order;
use crate::ports::repository::OrderRepository;

/// HashMap-backed `OrderRepository`.
#[derive(Debug, Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl MemoryOrderRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Whether the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn insert(&self, order: &Order) -> anyhow::Result<()> {
        let mut orders = self.orders.write().await;
        anyhow::ensure!(
            !orders.contains_key(&order.id),
            "Order {} already exists",
            order.id
        );
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn update(&self, order: &Order) -> anyhow::Result<()> {
        let mut orders = self.orders.write().await;
        anyhow::ensure!(
            orders.contains_key(&order.id),
            "Order {} not found",
            order.id
        );
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn due_for_settlement(&self, now: EpochSeconds) -> anyhow::Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut due: Vec<Order> = orders
            .values()
            .filter(|o| o.is_due(now))
            .cloned()
            .collect();
        // Deterministic sweep order
        due.sort_by_key(|o| (o.expiry_timestamp, o.id));
        Ok(due)
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
