use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use returnly_core::domain::order::{OrderId, OrderSnapshot, OrderStatus};

use super::{OrderRepository, RepositoryError};

/// In-process stand-in for the orders table with the same guarded-transition
/// semantics as the SQL implementation: the status and window checks happen
/// under the write lock, atomically with the mutation.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, StoredOrder>>,
}

#[derive(Clone, Debug)]
struct StoredOrder {
    created_at: DateTime<Utc>,
    status: OrderStatus,
}

impl InMemoryOrderRepository {
    pub async fn insert(&self, snapshot: OrderSnapshot) {
        let mut orders = self.orders.write().await;
        orders.insert(
            snapshot.id.0,
            StoredOrder { created_at: snapshot.created_at, status: snapshot.status },
        );
    }

    pub async fn status_of(&self, id: &OrderId) -> Option<OrderStatus> {
        let orders = self.orders.read().await;
        orders.get(&id.0).map(|order| order.status.clone())
    }
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_order(&self, id: &OrderId) -> Result<Option<OrderSnapshot>, RepositoryError> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id.0).map(|order| OrderSnapshot {
            id: *id,
            created_at: order.created_at,
            status: order.status.clone(),
        }))
    }

    async fn initiate_return(
        &self,
        id: &OrderId,
        earliest_created_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut orders = self.orders.write().await;
        let Some(order) = orders.get_mut(&id.0) else {
            return Ok(false);
        };

        if order.status.is_return_blocking() || order.created_at < earliest_created_at {
            return Ok(false);
        }

        order.status = OrderStatus::ReturnInitiated;
        Ok(true)
    }
}
