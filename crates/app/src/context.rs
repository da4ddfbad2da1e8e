//! Composition roots for the two tutorials.
//!
//! Each context builds its own bus, repositories and services; nothing is
//! global. Subscriptions are made here, before any use case can publish.

use std::sync::Arc;

use portico_bookstore::{BookRepository, BookStoreEvent, DomainEventService, ReferenceLibrary};
use portico_contracts::{ContractAuditService, ContractEvent, ContractRepository};
use portico_core::DomainResult;
use portico_events::EventBus;
use portico_infra::{
    InMemoryBookRepository, InMemoryContractRepository, InMemoryDomainEventStore,
    RecordingEventSender,
};

use crate::config::AppConfig;
use crate::services::{BookStoreService, ContractService};

pub struct BookStoreContext {
    pub bus: Arc<EventBus<BookStoreEvent>>,
    pub books: Arc<dyn BookRepository>,
    pub sender: Arc<RecordingEventSender>,
    pub service: BookStoreService,
    pub library: ReferenceLibrary,
}

impl BookStoreContext {
    /// Wire the book store with in-memory adapters. Nothing is seeded.
    pub fn new() -> Self {
        let bus: Arc<EventBus<BookStoreEvent>> = Arc::new(EventBus::new());
        let books: Arc<dyn BookRepository> = Arc::new(InMemoryBookRepository::new());
        let sender = Arc::new(RecordingEventSender::new());

        DomainEventService::new(sender.clone()).register(&bus);

        Self {
            service: BookStoreService::new(books.clone(), bus.clone()),
            library: ReferenceLibrary::new(books.clone()),
            bus,
            books,
            sender,
        }
    }

    /// Wire and apply start-up configuration.
    pub fn start(config: &AppConfig) -> DomainResult<Self> {
        let context = Self::new();
        if config.seed_library {
            context.library.add_latest_books()?;
        }
        Ok(context)
    }
}

impl Default for BookStoreContext {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ContractManagementContext {
    pub bus: Arc<EventBus<ContractEvent>>,
    pub contracts: Arc<dyn ContractRepository>,
    pub events: Arc<InMemoryDomainEventStore>,
    pub audit: Arc<ContractAuditService>,
    pub service: ContractService,
}

impl ContractManagementContext {
    /// Wire contract management; the audit service is subscribed before
    /// the context is handed out.
    pub fn new() -> Self {
        let bus: Arc<EventBus<ContractEvent>> = Arc::new(EventBus::new());
        let contracts: Arc<dyn ContractRepository> = Arc::new(InMemoryContractRepository::new());
        let events = Arc::new(InMemoryDomainEventStore::new());
        let audit = ContractAuditService::new(events.clone());
        audit.register(&bus);

        Self {
            service: ContractService::new(contracts.clone(), audit.clone(), bus.clone()),
            bus,
            contracts,
            events,
            audit,
        }
    }
}

impl Default for ContractManagementContext {
    fn default() -> Self {
        Self::new()
    }
}
