//! Synchronous, in-process event bus.
//!
//! The bus is a plain fan-out table: `publish` walks the subscriptions that
//! match the event's kind and calls each handler inline, in the caller's
//! thread. There is no buffering, no backpressure and nothing survives a
//! process restart.
//!
//! ## Dispatch order
//!
//! For an event of kind `k` the bus visits, in this order:
//!
//! 1. subscriptions declared for `Topic::Kind(k)`
//! 2. subscriptions for each of `k.supertypes()`, nearest first
//! 3. subscriptions for `Topic::Any`
//!
//! Within one topic, handlers run in subscription order.
//!
//! ## Failures
//!
//! The first handler error stops the dispatch and is returned to the
//! publisher. Handlers that already ran keep their side effects.
//!
//! The bus is owned explicitly (usually behind an `Arc`) by whoever wires the
//! application together; there is no process-wide instance.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use portico_core::DomainError;

use crate::event::{Event, EventKind, Topic};
use crate::handler::{EventHandler, HandlerError};

type HandlerRef<E> = Arc<dyn EventHandler<E>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// A subscriber failed; remaining subscribers were not called.
    #[error("handler for {event_type} failed: {source}")]
    Handler {
        event_type: &'static str,
        #[source]
        source: HandlerError,
    },
}

impl From<PublishError> for DomainError {
    fn from(value: PublishError) -> Self {
        DomainError::handler_failure(value.to_string())
    }
}

/// Type-aware publish/subscribe dispatcher for one event enum.
pub struct EventBus<E: Event> {
    subscriptions: RwLock<BTreeMap<Topic<E::Kind>, Vec<HandlerRef<E>>>>,
}

impl<E: Event> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`.
    ///
    /// Returns `false` (and registers nothing) if this exact handler instance
    /// is already subscribed to this exact topic.
    pub fn subscribe(
        &self,
        topic: impl Into<Topic<E::Kind>>,
        handler: Arc<dyn EventHandler<E>>,
    ) -> bool {
        let topic = topic.into();
        let mut subs = self
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let handlers = subs.entry(topic).or_default();
        if handlers
            .iter()
            .any(|existing| std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(&handler)))
        {
            tracing::debug!(?topic, "handler already subscribed");
            return false;
        }

        handlers.push(handler);
        tracing::debug!(?topic, subscribers = handlers.len(), "handler subscribed");
        true
    }

    /// Register `handler` for every event published on this bus.
    pub fn subscribe_any(&self, handler: Arc<dyn EventHandler<E>>) -> bool {
        self.subscribe(Topic::Any, handler)
    }

    /// Deliver `event` to every matching subscription before returning.
    pub fn publish(&self, event: &E) -> Result<(), PublishError> {
        let handlers = self.matching(event.kind());

        tracing::debug!(
            event_type = event.event_type(),
            subscribers = handlers.len(),
            "publishing domain event"
        );

        for handler in handlers {
            handler.handle(event).map_err(|source| {
                tracing::warn!(
                    event_type = event.event_type(),
                    error = %source,
                    "event handler failed"
                );
                PublishError::Handler {
                    event_type: event.event_type(),
                    source,
                }
            })?;
        }

        Ok(())
    }

    /// Publish each event in order, stopping at the first failure.
    pub fn publish_all<'a>(&self, events: impl IntoIterator<Item = &'a E>) -> Result<(), PublishError> {
        events.into_iter().try_for_each(|e| self.publish(e))
    }

    /// Number of handlers registered for exactly `topic`.
    pub fn subscribers_for(&self, topic: impl Into<Topic<E::Kind>>) -> usize {
        let subs = self
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        subs.get(&topic.into()).map_or(0, Vec::len)
    }

    /// Total number of subscriptions across all topics.
    pub fn subscriber_count(&self) -> usize {
        let subs = self
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        subs.values().map(Vec::len).sum()
    }

    // Snapshot under the read lock so handlers can subscribe/publish re-entrantly.
    fn matching(&self, kind: E::Kind) -> Vec<HandlerRef<E>> {
        let mut topics: Vec<Topic<E::Kind>> = Vec::with_capacity(kind.supertypes().len() + 2);
        topics.push(Topic::Kind(kind));
        for parent in kind.supertypes() {
            let topic = Topic::Kind(*parent);
            if !topics.contains(&topic) {
                topics.push(topic);
            }
        }
        topics.push(Topic::Any);

        let subs = self
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        topics
            .iter()
            .filter_map(|topic| subs.get(topic))
            .flat_map(|handlers| handlers.iter().cloned())
            .collect()
    }
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            subscriptions: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<E: Event> core::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriber_count())
            .finish()
    }
}
