//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Store- and aggregate-level failures are returned to the immediate caller,
/// never swallowed. Nothing in this workspace retries on any of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-positive stock amount).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. ISBN checksum mismatch).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The identifier does not refer to a stored aggregate.
    #[error("not found: {0}")]
    NotFound(String),

    /// An aggregate with the same identifier already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Tried to sell an item with nothing in stock.
    #[error("out of stock: {0}")]
    OutOfStock(String),

    /// The aggregate is not in a state that permits the operation.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// A subscriber returned an error while an event was being published.
    #[error("event handler failed: {0}")]
    HandlerFailure(String),

    /// The backing store failed for a reason unrelated to the domain.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn duplicate_key(what: impl Into<String>) -> Self {
        Self::DuplicateKey(what.into())
    }

    pub fn out_of_stock(what: impl Into<String>) -> Self {
        Self::OutOfStock(what.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn handler_failure(msg: impl Into<String>) -> Self {
        Self::HandlerFailure(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// `true` for failures caused by the caller's input or the aggregate state,
    /// as opposed to infrastructure failures.
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::HandlerFailure(_) | Self::Storage(_))
    }
}
