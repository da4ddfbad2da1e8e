use serde::{Deserialize, Serialize};

use portico_core::{AggregateRoot, DomainError, DomainResult};
use portico_events::{Event, EventKind};

use crate::isbn::Isbn13;

/// Aggregate root: a stocked book title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    isbn13: Isbn13,
    amount_in_stock: u32,
}

impl Book {
    /// Factory: a newly registered title with nothing in stock.
    pub fn new(isbn13: Isbn13) -> Self {
        Self {
            isbn13,
            amount_in_stock: 0,
        }
    }

    pub fn isbn13(&self) -> &Isbn13 {
        &self.isbn13
    }

    pub fn amount_in_stock(&self) -> u32 {
        self.amount_in_stock
    }

    pub fn in_stock(&self) -> bool {
        self.amount_in_stock > 0
    }

    /// Receive `amount` copies. Never emits an event.
    pub fn add_to_stock(&mut self, amount: u32) -> DomainResult<()> {
        if amount == 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        self.amount_in_stock = self
            .amount_in_stock
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("stock amount overflow"))?;
        Ok(())
    }

    /// Sell one copy.
    ///
    /// Returns [`BookSoldOut`] exactly when this sale took the last copy.
    pub fn sell(&mut self) -> DomainResult<Option<BookSoldOut>> {
        if self.amount_in_stock == 0 {
            return Err(DomainError::out_of_stock(self.isbn13.to_string()));
        }

        self.amount_in_stock -= 1;

        if self.amount_in_stock == 0 {
            Ok(Some(BookSoldOut {
                isbn13: self.isbn13.clone(),
            }))
        } else {
            Ok(None)
        }
    }
}

impl AggregateRoot for Book {
    type Id = Isbn13;

    fn id(&self) -> &Self::Id {
        &self.isbn13
    }
}

/// Event: the last copy of a title was sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSoldOut {
    pub isbn13: Isbn13,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStoreEvent {
    BookSoldOut(BookSoldOut),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookStoreEventKind {
    BookSoldOut,
}

impl EventKind for BookStoreEventKind {}

impl Event for BookStoreEvent {
    type Kind = BookStoreEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            BookStoreEvent::BookSoldOut(_) => BookStoreEventKind::BookSoldOut,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            BookStoreEvent::BookSoldOut(_) => "BookSoldOut",
        }
    }
}

impl From<BookSoldOut> for BookStoreEvent {
    fn from(value: BookSoldOut) -> Self {
        BookStoreEvent::BookSoldOut(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_book() -> Isbn13 {
        "978-3-86490-387-8".parse().unwrap()
    }

    #[test]
    fn add_to_stock_increases_amount_without_event() {
        let mut book = Book::new(any_book());
        book.add_to_stock(5).unwrap();

        assert_eq!(book.amount_in_stock(), 5);
        assert!(book.in_stock());
    }

    #[test]
    fn add_zero_is_rejected() {
        let mut book = Book::new(any_book());
        let err = book.add_to_stock(0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(book.amount_in_stock(), 0);
    }

    #[test]
    fn sell_from_more_than_one_emits_nothing() {
        let mut book = Book::new(any_book());
        book.add_to_stock(5).unwrap();

        assert_eq!(book.sell().unwrap(), None);
        assert_eq!(book.amount_in_stock(), 4);
    }

    #[test]
    fn selling_last_copy_emits_sold_out() {
        let mut book = Book::new(any_book());
        book.add_to_stock(1).unwrap();

        let event = book.sell().unwrap();

        assert_eq!(event, Some(BookSoldOut { isbn13: any_book() }));
        assert_eq!(book.amount_in_stock(), 0);
        assert!(!book.in_stock());
    }

    #[test]
    fn sell_out_of_stock_fails_and_leaves_state() {
        let mut book = Book::new(any_book());
        let before = book.clone();

        let err = book.sell().unwrap_err();

        assert!(matches!(err, DomainError::OutOfStock(_)));
        assert_eq!(book, before);
    }

    #[test]
    fn five_in_five_out_emits_exactly_one_event_on_last_sale() {
        let mut book = Book::new(any_book());
        book.add_to_stock(5).unwrap();

        let events: Vec<_> = (0..5).map(|_| book.sell().unwrap()).collect();

        assert!(events[..4].iter().all(Option::is_none));
        assert!(events[4].is_some());
        assert_eq!(book.amount_in_stock(), 0);
    }

    #[test]
    fn identifier_is_the_isbn() {
        let book = Book::new(any_book());
        assert_eq!(book.id(), &any_book());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Receive(u32),
        Sell,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![(1u32..5).prop_map(Op::Receive), Just(Op::Sell), Just(Op::Sell)]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: stock never goes negative and a sold-out event is emitted
        /// exactly on each 1 -> 0 transition.
        #[test]
        fn sold_out_fires_only_on_last_copy(ops in prop::collection::vec(op(), 0..64)) {
            let mut book = Book::new(any_book());
            let mut model: u32 = 0;

            for op in ops {
                match op {
                    Op::Receive(n) => {
                        book.add_to_stock(n).unwrap();
                        model += n;
                    }
                    Op::Sell => {
                        let before = book.amount_in_stock();
                        match book.sell() {
                            Ok(event) => {
                                prop_assert!(before > 0);
                                model -= 1;
                                prop_assert_eq!(event.is_some(), before == 1);
                            }
                            Err(e) => {
                                prop_assert_eq!(before, 0);
                                prop_assert!(matches!(e, DomainError::OutOfStock(_)));
                            }
                        }
                    }
                }
                prop_assert_eq!(book.amount_in_stock(), model);
            }
        }
    }
}
