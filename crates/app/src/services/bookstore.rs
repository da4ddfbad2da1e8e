use std::sync::Arc;

use portico_bookstore::{Book, BookRepository, BookStoreEvent, Isbn13};
use portico_core::DomainResult;
use portico_events::EventBus;

/// Stock receipt and sales.
pub struct BookStoreService {
    books: Arc<dyn BookRepository>,
    bus: Arc<EventBus<BookStoreEvent>>,
}

impl BookStoreService {
    pub fn new(books: Arc<dyn BookRepository>, bus: Arc<EventBus<BookStoreEvent>>) -> Self {
        Self { books, bus }
    }

    /// Receive `amount` copies, registering the title on first receipt.
    ///
    /// Returns the new amount in stock.
    pub fn add_to_stock(&self, isbn13: &Isbn13, amount: u32) -> DomainResult<u32> {
        let stocked = match self.books.search(isbn13)? {
            Some(mut book) => {
                book.add_to_stock(amount)?;
                let stocked = book.amount_in_stock();
                self.books.update(book)?;
                stocked
            }
            None => {
                let mut book = Book::new(isbn13.clone());
                book.add_to_stock(amount)?;
                let stocked = book.amount_in_stock();
                self.books.add(book)?;
                stocked
            }
        };

        tracing::info!(isbn13 = %isbn13, amount, stocked, "stock received");
        Ok(stocked)
    }

    /// Sell one copy. Fails with `NotFound` for an unregistered title and
    /// `OutOfStock` when no copy is left.
    ///
    /// The sale is stored before `BookSoldOut` is published; a failing
    /// subscriber yields `HandlerFailure` with the sale already recorded.
    pub fn sell(&self, isbn13: &Isbn13) -> DomainResult<()> {
        let mut book = self.books.get(isbn13)?;
        let sold_out = book.sell()?;

        let remaining = book.amount_in_stock();
        self.books.update(book)?;
        tracing::info!(isbn13 = %isbn13, remaining, "book sold");

        if let Some(sold_out) = sold_out {
            self.bus.publish(&sold_out.into())?;
        }
        Ok(())
    }

    /// Copies in stock; zero for a title that was never registered.
    pub fn amount_in_stock(&self, isbn13: &Isbn13) -> DomainResult<u32> {
        Ok(self
            .books
            .search(isbn13)?
            .map_or(0, |book| book.amount_in_stock()))
    }

    pub fn in_stock(&self, isbn13: &Isbn13) -> DomainResult<bool> {
        Ok(self.amount_in_stock(isbn13)? > 0)
    }

    pub fn get_books(&self) -> DomainResult<Vec<Book>> {
        self.books.get_all()
    }
}
