//! Store-backed adapters for the domain repository ports.

pub mod books;
pub mod contracts;
pub mod domain_events;

pub use books::InMemoryBookRepository;
pub use contracts::{ContractSchema, InMemoryContractRepository};
pub use domain_events::{DomainEventSchema, InMemoryDomainEventStore, SignatureRecord};
