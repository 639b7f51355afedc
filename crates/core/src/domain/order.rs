use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::DomainError;

/// Canonical order identifier. Orders are keyed by UUID in the external
/// order-management store; the wrapper exists so an unvalidated string can
/// never reach a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Syntactic validation only: accepts any RFC 4122 version/variant and
    /// makes no claim about existence in the store.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidOrderId(raw.to_string()))
    }

    pub fn is_valid_format(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Order lifecycle status as stored in `orders.order_status`.
///
/// The set is open: the order-management process may introduce values this
/// engine has never seen, and those must survive decode. Only the three
/// enumerated terminal statuses block a return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Placed,
    Shipped,
    Delivered,
    Canceled,
    Returned,
    ReturnInitiated,
    Other(String),
}

/// Statuses after which no further return action is permitted.
pub const RETURN_BLOCKING_STATUSES: [OrderStatus; 3] =
    [OrderStatus::Canceled, OrderStatus::Returned, OrderStatus::ReturnInitiated];

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "placed" => Self::Placed,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "canceled" => Self::Canceled,
            "returned" => Self::Returned,
            "return_initiated" => Self::ReturnInitiated,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Placed => "placed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
            Self::Returned => "returned",
            Self::ReturnInitiated => "return_initiated",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_return_blocking(&self) -> bool {
        RETURN_BLOCKING_STATUSES.contains(self)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two columns this engine reads, plus the key they were read by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}
