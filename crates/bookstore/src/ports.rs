//! Outbound ports of the book store, implemented by infrastructure adapters.

use portico_core::DomainResult;

use crate::book::{Book, BookStoreEvent};
use crate::isbn::Isbn13;

/// Persistent collection of books, keyed by ISBN.
pub trait BookRepository: Send + Sync {
    /// Fails with `DuplicateKey` if the ISBN is already registered.
    fn add(&self, book: Book) -> DomainResult<()>;

    /// Fails with `NotFound` if the ISBN is not registered.
    fn update(&self, book: Book) -> DomainResult<()>;

    /// Fails with `NotFound` if the ISBN is not registered.
    fn remove(&self, isbn13: &Isbn13) -> DomainResult<()>;

    /// Fails with `NotFound` if the ISBN is not registered.
    fn get(&self, isbn13: &Isbn13) -> DomainResult<Book>;

    fn search(&self, isbn13: &Isbn13) -> DomainResult<Option<Book>>;

    fn get_all(&self) -> DomainResult<Vec<Book>>;

    fn is_registered(&self, isbn13: &Isbn13) -> DomainResult<bool> {
        Ok(self.search(isbn13)?.is_some())
    }
}

/// Forwards domain events to consumers outside this process.
pub trait DomainEventSender: Send + Sync {
    fn send(&self, event: &BookStoreEvent) -> DomainResult<()>;
}
