use portico_bookstore::{Book, BookRepository, Isbn13};
use portico_core::{DomainError, DomainResult};

use crate::object_store::{InMemoryObjectStore, NoTags, ObjectStore};

/// Books keyed by ISBN. Lookups are by key only, so no tags are declared.
#[derive(Debug)]
pub struct InMemoryBookRepository {
    store: InMemoryObjectStore<Book, Isbn13, NoTags>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryObjectStore::new("books", |book: &Book| book.isbn13().clone()),
        }
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BookRepository for InMemoryBookRepository {
    fn add(&self, book: Book) -> DomainResult<()> {
        Ok(self.store.add(book)?)
    }

    fn update(&self, book: Book) -> DomainResult<()> {
        Ok(self.store.update(book)?)
    }

    fn remove(&self, isbn13: &Isbn13) -> DomainResult<()> {
        self.store.remove(isbn13)?;
        Ok(())
    }

    fn get(&self, isbn13: &Isbn13) -> DomainResult<Book> {
        self.store
            .get(isbn13)?
            .ok_or_else(|| DomainError::not_found(format!("book {isbn13}")))
    }

    fn search(&self, isbn13: &Isbn13) -> DomainResult<Option<Book>> {
        Ok(self.store.get(isbn13)?)
    }

    fn get_all(&self) -> DomainResult<Vec<Book>> {
        Ok(self.store.get_all()?)
    }

    fn is_registered(&self, isbn13: &Isbn13) -> DomainResult<bool> {
        Ok(self.store.contains(isbn13)?)
    }
}
