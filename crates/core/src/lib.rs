pub mod config;
pub mod domain;
pub mod errors;
pub mod returns;

pub use domain::order::{OrderId, OrderSnapshot, OrderStatus};
pub use errors::DomainError;
pub use returns::{evaluate_eligibility, EligibilityRuling, ReturnOutcome, RETURN_WINDOW_DAYS};
