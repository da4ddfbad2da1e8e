//! Infrastructure layer: the indexed object store and the adapters that
//! implement the domain ports on top of it.

pub mod messaging;
pub mod object_store;
pub mod repositories;

mod integration_tests;

pub use messaging::{RecordedMessage, RecordingEventSender};
pub use object_store::{InMemoryObjectStore, ObjectStore, StoreError};
pub use repositories::{InMemoryBookRepository, InMemoryContractRepository, InMemoryDomainEventStore};
