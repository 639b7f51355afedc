use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("order id `{0}` is not a syntactically valid UUID")]
    InvalidOrderId(String),
}
