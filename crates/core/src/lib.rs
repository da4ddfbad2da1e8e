//! `portico-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every tutorial
//! application (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use error::{DomainError, DomainResult};
pub use id::EventId;
pub use value_object::ValueObject;
