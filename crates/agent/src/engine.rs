use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use returnly_core::domain::order::{OrderId, OrderSnapshot};
use returnly_core::returns::{evaluate_eligibility, return_window, EligibilityRuling, ReturnOutcome};
use returnly_db::{OrderRepository, RepositoryError};

/// Orchestrates the two operations against an injected order store.
///
/// Both operations re-derive eligibility from current store state; nothing is
/// trusted from a prior call. `initiate_return` additionally relies on the
/// repository's guarded transition so the final check is atomic with the
/// write.
pub struct ReturnsEngine {
    orders: Arc<dyn OrderRepository>,
}

impl ReturnsEngine {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn check_return_eligibility(&self, raw_order_id: &str) -> ReturnOutcome {
        let order_id = match OrderId::parse(raw_order_id) {
            Ok(order_id) => order_id,
            Err(_) => return ReturnOutcome::InvalidFormat { raw: raw_order_id.to_string() },
        };

        let snapshot = match self.fetch(&order_id).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return ReturnOutcome::NotFound { order_id },
            Err(outcome) => return outcome,
        };

        ReturnOutcome::from_ruling(order_id, evaluate_eligibility(&snapshot, Utc::now()))
    }

    pub async fn initiate_return(&self, raw_order_id: &str) -> ReturnOutcome {
        let order_id = match OrderId::parse(raw_order_id) {
            Ok(order_id) => order_id,
            Err(_) => return ReturnOutcome::InvalidFormat { raw: raw_order_id.to_string() },
        };

        let now = Utc::now();
        let snapshot = match self.fetch(&order_id).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return ReturnOutcome::NotFound { order_id },
            Err(outcome) => return outcome,
        };

        if let ruling @ (EligibilityRuling::Blocked { .. } | EligibilityRuling::Expired { .. }) =
            evaluate_eligibility(&snapshot, now)
        {
            return ReturnOutcome::from_ruling(order_id, ruling);
        }

        let earliest_created_at = now - return_window();
        match self.orders.initiate_return(&order_id, earliest_created_at).await {
            Ok(true) => {
                info!(
                    event_name = "returns.initiated",
                    order_id = %order_id,
                    "order transitioned to return_initiated"
                );
                ReturnOutcome::Initiated { order_id }
            }
            // The conditional update matched nothing even though the
            // pre-read said eligible: somebody else won the race, or the
            // window closed between read and write. Re-read and classify.
            Ok(false) => self.classify_lost_transition(order_id).await,
            Err(error) => database_error(&error),
        }
    }

    async fn fetch(&self, order_id: &OrderId) -> Result<Option<OrderSnapshot>, ReturnOutcome> {
        self.orders.find_order(order_id).await.map_err(|error| database_error(&error))
    }

    async fn classify_lost_transition(&self, order_id: OrderId) -> ReturnOutcome {
        let snapshot = match self.fetch(&order_id).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return ReturnOutcome::NotFound { order_id },
            Err(outcome) => return outcome,
        };

        match evaluate_eligibility(&snapshot, Utc::now()) {
            EligibilityRuling::Blocked { status } => {
                ReturnOutcome::AlreadyTerminal { order_id, status }
            }
            EligibilityRuling::Expired { age_days } => {
                ReturnOutcome::Expired { order_id, age_days }
            }
            // The store refused the update but still reports the order as
            // eligible; refuse to guess and surface it as a store fault.
            EligibilityRuling::Eligible { .. } => ReturnOutcome::DatabaseError {
                detail: format!(
                    "conditional update affected no rows for eligible order {order_id}"
                ),
            },
        }
    }
}

fn database_error(error: &RepositoryError) -> ReturnOutcome {
    warn!(event_name = "returns.database_error", error = %error, "order store operation failed");
    ReturnOutcome::DatabaseError { detail: error.to_string() }
}
