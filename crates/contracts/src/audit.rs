//! Audit projection of signed contracts.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use portico_core::DomainResult;
use portico_events::{EventBus, EventHandler, HandlerError};

use crate::contract::{ContractEvent, ContractEventKind, ContractNumber, ContractSigned};
use crate::ports::DomainEventStore;

/// Records every [`ContractSigned`] event published on the bus.
pub struct ContractAuditService {
    store: Arc<dyn DomainEventStore>,
}

impl ContractAuditService {
    pub fn new(store: Arc<dyn DomainEventStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }

    /// Subscribe to `ContractSigned` on `bus`. Call once at start-up.
    pub fn register(self: &Arc<Self>, bus: &EventBus<ContractEvent>) -> bool {
        bus.subscribe(ContractEventKind::ContractSigned, self.clone())
    }

    pub fn all(&self) -> DomainResult<Vec<ContractSigned>> {
        self.store.get_all()
    }

    /// Signatures with a date in `[start, end]`.
    pub fn between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Vec<ContractSigned>> {
        self.store.get_between(start, end)
    }

    pub fn for_contract(&self, contract_number: ContractNumber) -> DomainResult<Vec<ContractSigned>> {
        self.store.get_for_contract(contract_number)
    }
}

impl EventHandler<ContractEvent> for ContractAuditService {
    fn handle(&self, event: &ContractEvent) -> Result<(), HandlerError> {
        match event {
            ContractEvent::ContractSigned(signed) => {
                self.store.add(signed.clone())?;
                tracing::debug!(
                    contract_number = %signed.contract_number,
                    signature_date = %signed.signature_date,
                    "signature recorded"
                );
            }
        }
        Ok(())
    }
}
