use thiserror::Error;

use portico_core::DomainError;

/// Error returned by a subscriber.
///
/// The bus never swallows it: it ends the dispatch and is handed back to the
/// publisher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DomainError> for HandlerError {
    fn from(value: DomainError) -> Self {
        Self::new(value.to_string())
    }
}

/// Synchronous event subscriber.
///
/// Handlers run in the publisher's thread, before `publish` returns. Any
/// `Fn(&E) -> Result<(), HandlerError>` closure is a handler.
pub trait EventHandler<E>: Send + Sync {
    fn handle(&self, event: &E) -> Result<(), HandlerError>;
}

impl<E, F> EventHandler<E> for F
where
    F: Fn(&E) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        self(event)
    }
}
