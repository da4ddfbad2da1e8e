//! Use cases. Each one loads an aggregate, mutates it, persists it and only
//! then publishes the resulting events. A failing subscriber is reported as
//! `HandlerFailure` but the mutation stands, so every state transition is
//! published at most once and a retry is rejected by the aggregate.

pub mod bookstore;
pub mod contracts;

pub use bookstore::BookStoreService;
pub use contracts::ContractService;
