//! Recording subscriber for tests/dev.

use std::sync::{Arc, Mutex, PoisonError};

use crate::bus::EventBus;
use crate::event::{Event, Topic};
use crate::handler::{EventHandler, HandlerError};

/// Handler that keeps every event it receives, in delivery order.
#[derive(Debug)]
pub struct EventRecorder<E> {
    events: Mutex<Vec<E>>,
}

impl<E: Event> EventRecorder<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder and subscribe it to `topic` on `bus`.
    pub fn attach(bus: &EventBus<E>, topic: impl Into<Topic<E::Kind>>) -> Arc<Self> {
        let recorder = Arc::new(Self::new());
        bus.subscribe(topic, recorder.clone());
        recorder
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<E> {
        self.lock().clone()
    }

    /// Recorded events of exactly `kind`.
    pub fn of_kind(&self, kind: E::Kind) -> Vec<E> {
        self.lock()
            .iter()
            .filter(|e| e.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<E> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<E>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> Default for EventRecorder<E> {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

impl<E: Event> EventHandler<E> for EventRecorder<E> {
    fn handle(&self, event: &E) -> Result<(), HandlerError> {
        self.lock().push(event.clone());
        Ok(())
    }
}
