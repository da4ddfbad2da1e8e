//! Book store tutorial domain.
//!
//! Books are stocked and sold; selling the last copy of a title emits
//! [`BookSoldOut`]. Everything here is domain logic plus the ports the
//! infrastructure has to implement (no IO, no storage).

pub mod book;
pub mod isbn;
pub mod ports;
pub mod services;

pub use book::{Book, BookSoldOut, BookStoreEvent, BookStoreEventKind};
pub use isbn::Isbn13;
pub use ports::{BookRepository, DomainEventSender};
pub use services::{DomainEventService, ReferenceLibrary};
