use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use returnly_core::domain::order::{OrderId, OrderSnapshot};

pub mod memory;
pub mod order;

pub use memory::InMemoryOrderRepository;
pub use order::SqlOrderRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Storage seam for the returns engine.
///
/// `initiate_return` is the guarded transition: the status update must only
/// apply while the order is non-terminal and was created at or after
/// `earliest_created_at`, and the check must be atomic with the write so two
/// concurrent initiators cannot both succeed. Implementations report whether
/// a row actually transitioned; classifying a `false` is the caller's job.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_order(&self, id: &OrderId) -> Result<Option<OrderSnapshot>, RepositoryError>;

    async fn initiate_return(
        &self,
        id: &OrderId,
        earliest_created_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;
}
