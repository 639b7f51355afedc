//! Return eligibility policy and the result taxonomy rendered to callers.
//!
//! Eligibility is a pure function of `(created_at, order_status, now)`:
//! an order can be returned iff its status is not terminal and no more than
//! 30 days have elapsed since it was placed. The boundary is inclusive at
//! exactly 30 days and compares full durations, not floored day counts, so
//! 30 days and 1 second is already expired. `age_days` is floored only for
//! message rendering.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::domain::order::{OrderId, OrderSnapshot, OrderStatus};

/// Days after order creation during which a return may be initiated.
pub const RETURN_WINDOW_DAYS: i64 = 30;

pub fn return_window() -> Duration {
    Duration::days(RETURN_WINDOW_DAYS)
}

/// Outcome of the pure eligibility predicate. Status blocks are checked
/// before the window so a canceled 60-day-old order reports its status, not
/// its age.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EligibilityRuling {
    Eligible { age_days: i64 },
    Blocked { status: OrderStatus },
    Expired { age_days: i64 },
}

pub fn evaluate_eligibility(snapshot: &OrderSnapshot, now: DateTime<Utc>) -> EligibilityRuling {
    if snapshot.status.is_return_blocking() {
        return EligibilityRuling::Blocked { status: snapshot.status.clone() };
    }

    let age = now - snapshot.created_at;
    let age_days = age.num_days();
    if age > return_window() {
        EligibilityRuling::Expired { age_days }
    } else {
        EligibilityRuling::Eligible { age_days }
    }
}

/// Everything the two operations can report. Every variant renders to a
/// plain descriptive sentence because the consuming agent has no structured
/// error handling, only text it relays to an end user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReturnOutcome {
    Eligible { order_id: OrderId, age_days: i64 },
    Initiated { order_id: OrderId },
    InvalidFormat { raw: String },
    NotFound { order_id: OrderId },
    AlreadyTerminal { order_id: OrderId, status: OrderStatus },
    Expired { order_id: OrderId, age_days: i64 },
    DatabaseError { detail: String },
}

impl ReturnOutcome {
    pub fn from_ruling(order_id: OrderId, ruling: EligibilityRuling) -> Self {
        match ruling {
            EligibilityRuling::Eligible { age_days } => Self::Eligible { order_id, age_days },
            EligibilityRuling::Blocked { status } => Self::AlreadyTerminal { order_id, status },
            EligibilityRuling::Expired { age_days } => Self::Expired { order_id, age_days },
        }
    }
}

impl fmt::Display for ReturnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eligible { order_id, age_days } => write!(
                f,
                "Order {order_id} is eligible for return. It was placed {age_days} days ago."
            ),
            Self::Initiated { order_id } => write!(
                f,
                "Successfully initiated return for Order {order_id}. Status set to 'return_initiated'."
            ),
            Self::InvalidFormat { raw } => {
                write!(f, "Error: `{raw}` is not a valid order id (expected a UUID).")
            }
            Self::NotFound { order_id } => write!(f, "Error: Order ID {order_id} not found."),
            Self::AlreadyTerminal { order_id, status } => {
                write!(f, "Order {order_id} is already {status} and cannot be returned.")
            }
            Self::Expired { order_id, age_days } => write!(
                f,
                "Order {order_id} is NOT eligible for return. It was placed {age_days} days ago (limit is {RETURN_WINDOW_DAYS} days)."
            ),
            Self::DatabaseError { detail } => write!(f, "Database error: {detail}"),
        }
    }
}
