//! Outbound messaging adapter for book store events.
//!
//! Events are serialized to JSON and handed to a message channel under a
//! fixed topic, with the event type in a `Type` header. The in-memory
//! implementation keeps every message so callers can inspect what was sent.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use portico_bookstore::{BookStoreEvent, DomainEventSender};
use portico_core::{DomainError, DomainResult};
use portico_events::Event;

pub const BOOK_STORE_TOPIC: &str = "BookStoreTopic";
pub const TYPE_HEADER: &str = "Type";

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<MessagingError> for DomainError {
    fn from(value: MessagingError) -> Self {
        DomainError::storage(value.to_string())
    }
}

/// A message as handed to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    pub topic: String,
    pub headers: BTreeMap<String, String>,
    pub payload: String,
}

impl RecordedMessage {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// [`DomainEventSender`] that records JSON messages in memory.
#[derive(Debug, Default)]
pub struct RecordingEventSender {
    sent: Mutex<Vec<RecordedMessage>>,
}

impl RecordingEventSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn encode(event: &BookStoreEvent) -> Result<RecordedMessage, MessagingError> {
        let payload = match event {
            BookStoreEvent::BookSoldOut(sold_out) => serde_json::to_string(sold_out)?,
        };

        let mut headers = BTreeMap::new();
        headers.insert(TYPE_HEADER.to_owned(), event.event_type().to_owned());

        Ok(RecordedMessage {
            topic: BOOK_STORE_TOPIC.to_owned(),
            headers,
            payload,
        })
    }
}

impl DomainEventSender for RecordingEventSender {
    fn send(&self, event: &BookStoreEvent) -> DomainResult<()> {
        let message = Self::encode(event)?;
        tracing::info!(
            topic = %message.topic,
            event_type = event.event_type(),
            "domain event sent"
        );
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use portico_bookstore::{BookSoldOut, Isbn13};
    use serde_json::Value as JsonValue;

    use super::*;

    #[test]
    fn sold_out_is_sent_as_json_with_type_header() {
        let sender = RecordingEventSender::new();
        let isbn: Isbn13 = "978-3-86490-387-8".parse().unwrap();

        sender
            .send(&BookStoreEvent::BookSoldOut(BookSoldOut { isbn13: isbn.clone() }))
            .unwrap();

        let messages = sender.messages();
        assert_eq!(messages.len(), 1);
        let message = &messages[0];
        assert_eq!(message.topic, BOOK_STORE_TOPIC);
        assert_eq!(message.header(TYPE_HEADER), Some("BookSoldOut"));

        let body: JsonValue = serde_json::from_str(&message.payload).unwrap();
        assert_eq!(body["isbn13"], JsonValue::String(isbn.to_string()));
    }

    #[test]
    fn poisoned_channel_still_exposes_sent_messages() {
        let sender = Arc::new(RecordingEventSender::new());
        let isbn: Isbn13 = "978-3-86490-387-8".parse().unwrap();
        sender
            .send(&BookStoreEvent::BookSoldOut(BookSoldOut { isbn13: isbn.clone() }))
            .unwrap();

        let poisoner = Arc::clone(&sender);
        let _ = std::thread::spawn(move || {
            let sent = poisoner.sent.lock().unwrap();
            assert!(sent.is_empty(), "panic while holding the channel lock");
        })
        .join();
        assert!(sender.sent.is_poisoned());

        assert_eq!(sender.messages().len(), 1);
        sender
            .send(&BookStoreEvent::BookSoldOut(BookSoldOut { isbn13: isbn }))
            .unwrap();
        assert_eq!(sender.messages().len(), 2);
    }
}
