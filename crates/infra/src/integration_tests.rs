//! Integration tests for the publish/record pipeline.
//!
//! Tests: Aggregate → EventBus → handler → ObjectStore
//!
//! Verifies:
//! - Signed contracts land in the audit store and answer range queries
//! - Sold-out events reach the outbound message channel
//! - A failing handler surfaces as an error to the publisher

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use portico_bookstore::{Book, BookRepository, BookStoreEvent, DomainEventService, Isbn13, ReferenceLibrary};
    use portico_contracts::{
        Contract, ContractAuditService, ContractEvent, ContractNumber, ContractRepository,
    };
    use portico_core::DomainError;
    use portico_events::{EventBus, HandlerError, Topic};

    use crate::messaging::{RecordingEventSender, TYPE_HEADER};
    use crate::repositories::{InMemoryBookRepository, InMemoryContractRepository, InMemoryDomainEventStore};

    fn signed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap()
    }

    fn contracts_setup() -> (
        Arc<EventBus<ContractEvent>>,
        Arc<InMemoryContractRepository>,
        Arc<ContractAuditService>,
    ) {
        let bus: Arc<EventBus<ContractEvent>> = Arc::new(EventBus::new());
        let contracts = Arc::new(InMemoryContractRepository::new());
        let audit = ContractAuditService::new(Arc::new(InMemoryDomainEventStore::new()));
        audit.register(&bus);
        (bus, contracts, audit)
    }

    #[test]
    fn signing_a_contract_records_it_in_the_audit_store() {
        let (bus, contracts, audit) = contracts_setup();
        contracts
            .add(Contract::new(ContractNumber::FIRST, "Ann").unwrap())
            .unwrap();

        let mut contract = contracts.get(ContractNumber::FIRST).unwrap();
        let event = contract.sign(signed_at()).unwrap();
        contracts.update(contract).unwrap();
        bus.publish(&event.clone().into()).unwrap();

        assert_eq!(audit.all().unwrap(), vec![event.clone()]);
        assert_eq!(
            audit
                .between(signed_at() - Duration::seconds(1), signed_at() + Duration::seconds(1))
                .unwrap(),
            vec![event]
        );
        assert!(
            audit
                .between(signed_at() + Duration::seconds(1), signed_at() + Duration::hours(1))
                .unwrap()
                .is_empty()
        );
        assert_eq!(contracts.get_signed_contracts().unwrap().len(), 1);
    }

    #[test]
    fn failing_audit_listener_is_reported_to_publisher() {
        let (bus, contracts, audit) = contracts_setup();
        bus.subscribe_any(Arc::new(|_: &ContractEvent| -> Result<(), HandlerError> {
            Err(HandlerError::new("mail server down"))
        }));
        contracts
            .add(Contract::new(ContractNumber::FIRST, "Ann").unwrap())
            .unwrap();

        let mut contract = contracts.get(ContractNumber::FIRST).unwrap();
        let event = contract.sign(signed_at()).unwrap();
        contracts.update(contract).unwrap();
        let err: DomainError = bus.publish(&event.into()).unwrap_err().into();

        assert!(matches!(err, DomainError::HandlerFailure(_)));
        // Audit runs before the failing catch-all listener.
        assert_eq!(audit.all().unwrap().len(), 1);
        assert!(contracts.get(ContractNumber::FIRST).unwrap().is_signed());
    }

    #[test]
    fn selling_out_forwards_message_on_book_store_topic() {
        let bus: Arc<EventBus<BookStoreEvent>> = Arc::new(EventBus::new());
        let books = Arc::new(InMemoryBookRepository::new());
        let sender = Arc::new(RecordingEventSender::new());
        DomainEventService::new(sender.clone()).register(&bus);

        let isbn: Isbn13 = "978-3-86490-387-8".parse().unwrap();
        let mut book = Book::new(isbn.clone());
        book.add_to_stock(2).unwrap();
        books.add(book).unwrap();

        for _ in 0..2 {
            let mut book = books.get(&isbn).unwrap();
            let sold_out = book.sell().unwrap();
            books.update(book).unwrap();
            if let Some(sold_out) = sold_out {
                bus.publish(&sold_out.into()).unwrap();
            }
        }

        let messages = sender.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].header(TYPE_HEADER), Some("BookSoldOut"));
        assert_eq!(books.get(&isbn).unwrap().amount_in_stock(), 0);
        assert_eq!(bus.subscribers_for(Topic::Any), 1);
    }

    #[test]
    fn reference_library_seeds_the_repository() {
        let books = Arc::new(InMemoryBookRepository::new());
        let library = ReferenceLibrary::new(books.clone());

        let added = library.add_latest_books().unwrap();

        assert_eq!(books.get_all().unwrap().len(), added);
        assert!(books.get_all().unwrap().iter().all(|b| !b.in_stock()));
    }
}
