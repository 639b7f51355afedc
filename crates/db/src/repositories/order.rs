use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use returnly_core::domain::order::{
    OrderId, OrderSnapshot, OrderStatus, RETURN_BLOCKING_STATUSES,
};

use super::{OrderRepository, RepositoryError};
use crate::DbPool;

pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn find_order(&self, id: &OrderId) -> Result<Option<OrderSnapshot>, RepositoryError> {
        let row = sqlx::query(
            "SELECT created_at, order_status
             FROM orders
             WHERE id = ?",
        )
        .bind(id.0.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| snapshot_from_row(*id, row)).transpose()
    }

    /// Compare-and-swap on `order_status`: the terminal-status and age-window
    /// guards are part of the update statement itself, so a concurrent
    /// initiator that commits first leaves nothing for this one to match.
    async fn initiate_return(
        &self,
        id: &OrderId,
        earliest_created_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let target = OrderStatus::ReturnInitiated;
        let blocked = RETURN_BLOCKING_STATUSES;

        let result = sqlx::query(
            "UPDATE orders
             SET order_status = ?
             WHERE id = ?
               AND order_status NOT IN (?, ?, ?)
               AND created_at >= ?",
        )
        .bind(target.as_str())
        .bind(id.0.to_string())
        .bind(blocked[0].as_str())
        .bind(blocked[1].as_str())
        .bind(blocked[2].as_str())
        .bind(earliest_created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

fn snapshot_from_row(id: OrderId, row: SqliteRow) -> Result<OrderSnapshot, RepositoryError> {
    let status = OrderStatus::parse(&row.try_get::<String, _>("order_status")?);
    let created_at = parse_timestamp("created_at", row.try_get("created_at")?)?;

    Ok(OrderSnapshot { id, created_at, status })
}

fn parse_timestamp(column: &str, value: String) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(&value).map(|timestamp| timestamp.with_timezone(&Utc)).map_err(
        |error| {
            RepositoryError::Decode(format!("invalid timestamp in `{column}`: `{value}` ({error})"))
        },
    )
}
