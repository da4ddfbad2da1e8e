//! Domain services of the book store.

use std::sync::Arc;

use portico_core::DomainResult;
use portico_events::{EventBus, EventHandler, HandlerError, Topic};

use crate::book::{Book, BookStoreEvent};
use crate::isbn::Isbn13;
use crate::ports::{BookRepository, DomainEventSender};

/// Titles every fresh book store starts with.
const LATEST_BOOKS: [&str; 6] = [
    "978-1-60309-025-4",
    "978-1-60309-047-6",
    "978-1-60309-322-4",
    "978-1-891830-85-3",
    "978-1-60309-016-2",
    "978-1-60309-265-4",
];

/// Registers the latest reference titles in the repository.
pub struct ReferenceLibrary {
    repository: Arc<dyn BookRepository>,
}

impl ReferenceLibrary {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Add every reference title that is not registered yet.
    ///
    /// Returns the number of titles added; running it twice adds nothing the
    /// second time.
    pub fn add_latest_books(&self) -> DomainResult<usize> {
        let mut added = 0;
        for isbn13 in Self::latest_books()? {
            if !self.repository.is_registered(&isbn13)? {
                self.repository.add(Book::new(isbn13))?;
                added += 1;
            }
        }
        tracing::info!(added, "reference library synchronised");
        Ok(added)
    }

    fn latest_books() -> DomainResult<Vec<Isbn13>> {
        LATEST_BOOKS.iter().map(|s| s.parse()).collect()
    }
}

/// Forwards every domain event published on the bus to a [`DomainEventSender`].
pub struct DomainEventService {
    sender: Arc<dyn DomainEventSender>,
}

impl DomainEventService {
    pub fn new(sender: Arc<dyn DomainEventSender>) -> Arc<Self> {
        Arc::new(Self { sender })
    }

    /// Subscribe this service to all events on `bus`.
    pub fn register(self: &Arc<Self>, bus: &EventBus<BookStoreEvent>) -> bool {
        bus.subscribe(Topic::Any, self.clone())
    }
}

impl EventHandler<BookStoreEvent> for DomainEventService {
    fn handle(&self, event: &BookStoreEvent) -> Result<(), HandlerError> {
        self.sender.send(event).map_err(HandlerError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use portico_core::DomainError;

    use super::*;
    use crate::book::BookSoldOut;

    #[derive(Default)]
    struct BooksFake {
        books: Mutex<BTreeMap<Isbn13, Book>>,
    }

    impl BookRepository for BooksFake {
        fn add(&self, book: Book) -> DomainResult<()> {
            let mut books = self.books.lock().unwrap();
            if books.contains_key(book.isbn13()) {
                return Err(DomainError::duplicate_key(book.isbn13().to_string()));
            }
            books.insert(book.isbn13().clone(), book);
            Ok(())
        }

        fn update(&self, book: Book) -> DomainResult<()> {
            self.books.lock().unwrap().insert(book.isbn13().clone(), book);
            Ok(())
        }

        fn remove(&self, isbn13: &Isbn13) -> DomainResult<()> {
            self.books.lock().unwrap().remove(isbn13);
            Ok(())
        }

        fn get(&self, isbn13: &Isbn13) -> DomainResult<Book> {
            self.search(isbn13)?
                .ok_or_else(|| DomainError::not_found(isbn13.to_string()))
        }

        fn search(&self, isbn13: &Isbn13) -> DomainResult<Option<Book>> {
            Ok(self.books.lock().unwrap().get(isbn13).cloned())
        }

        fn get_all(&self) -> DomainResult<Vec<Book>> {
            Ok(self.books.lock().unwrap().values().cloned().collect())
        }
    }

    #[derive(Default)]
    struct SenderFake {
        sent: Mutex<Vec<BookStoreEvent>>,
        fail: bool,
    }

    impl DomainEventSender for SenderFake {
        fn send(&self, event: &BookStoreEvent) -> DomainResult<()> {
            if self.fail {
                return Err(DomainError::storage("broker unreachable"));
            }
            self.sent.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    fn sold_out() -> BookStoreEvent {
        BookStoreEvent::BookSoldOut(BookSoldOut {
            isbn13: "978-3-86490-387-8".parse().unwrap(),
        })
    }

    #[test]
    fn reference_library_adds_missing_titles_once() {
        let repository = Arc::new(BooksFake::default());
        let library = ReferenceLibrary::new(repository.clone());

        assert_eq!(library.add_latest_books().unwrap(), 6);
        assert_eq!(library.add_latest_books().unwrap(), 0);
        assert_eq!(repository.get_all().unwrap().len(), 6);
    }

    #[test]
    fn reference_library_keeps_existing_stock() {
        let repository = Arc::new(BooksFake::default());
        let isbn13: Isbn13 = LATEST_BOOKS[0].parse().unwrap();
        let mut stocked = Book::new(isbn13.clone());
        stocked.add_to_stock(3).unwrap();
        repository.add(stocked).unwrap();

        let added = ReferenceLibrary::new(repository.clone()).add_latest_books().unwrap();

        assert_eq!(added, 5);
        assert_eq!(repository.get(&isbn13).unwrap().amount_in_stock(), 3);
    }

    #[test]
    fn domain_event_service_forwards_published_events() {
        let bus = EventBus::new();
        let sender = Arc::new(SenderFake::default());
        let service = DomainEventService::new(sender.clone());

        assert!(service.register(&bus));
        assert!(!service.register(&bus));

        bus.publish(&sold_out()).unwrap();
        assert_eq!(*sender.sent.lock().unwrap(), vec![sold_out()]);
    }

    #[test]
    fn sender_failure_surfaces_as_publish_error() {
        let bus = EventBus::new();
        let sender = Arc::new(SenderFake {
            fail: true,
            ..SenderFake::default()
        });
        DomainEventService::new(sender).register(&bus);

        let err: DomainError = bus.publish(&sold_out()).unwrap_err().into();
        assert!(matches!(err, DomainError::HandlerFailure(msg) if msg.contains("broker unreachable")));
    }
}
