use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portico_contracts::{ContractNumber, ContractSigned, DomainEventStore};
use portico_core::{DomainResult, EventId};

use crate::object_store::{InMemoryObjectStore, IndexValue, MetaTag, MetadataSchema, ObjectStore};

/// A recorded signature. Every recording gets its own id, so the same event
/// recorded twice yields two records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub id: EventId,
    pub event: ContractSigned,
}

impl SignatureRecord {
    pub fn new(event: ContractSigned) -> Self {
        Self {
            id: EventId::new(),
            event,
        }
    }

    fn id(&self) -> EventId {
        self.id
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DomainEventSchema {
    ContractNumber,
    SignatureDate,
}

impl MetadataSchema<SignatureRecord> for DomainEventSchema {
    const ALL: &'static [Self] = &[DomainEventSchema::ContractNumber, DomainEventSchema::SignatureDate];

    fn tag(self) -> MetaTag<SignatureRecord> {
        match self {
            DomainEventSchema::ContractNumber => {
                MetaTag::Numeric(|r| i64::from(r.event.contract_number.value()))
            }
            DomainEventSchema::SignatureDate => MetaTag::Timestamp(|r| r.event.signature_date),
        }
    }
}

/// Audit log of contract signatures.
#[derive(Debug)]
pub struct InMemoryDomainEventStore {
    store: InMemoryObjectStore<SignatureRecord, EventId, DomainEventSchema>,
}

impl InMemoryDomainEventStore {
    pub fn new() -> Self {
        Self {
            store: InMemoryObjectStore::new("domain_events", SignatureRecord::id),
        }
    }

    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.store.is_empty()?)
    }

    fn events(records: Vec<SignatureRecord>) -> Vec<ContractSigned> {
        records.into_iter().map(|r| r.event).collect()
    }
}

impl Default for InMemoryDomainEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventStore for InMemoryDomainEventStore {
    fn add(&self, event: ContractSigned) -> DomainResult<()> {
        Ok(self.store.add(SignatureRecord::new(event))?)
    }

    fn get_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Vec<ContractSigned>> {
        let records = self.store.range_closed(
            DomainEventSchema::SignatureDate,
            IndexValue::Timestamp(start),
            IndexValue::Timestamp(end),
        )?;
        Ok(Self::events(records))
    }

    fn get_all(&self) -> DomainResult<Vec<ContractSigned>> {
        let records = self.store.ascending(DomainEventSchema::SignatureDate, usize::MAX)?;
        Ok(Self::events(records))
    }

    fn get_for_contract(&self, contract_number: ContractNumber) -> DomainResult<Vec<ContractSigned>> {
        let records = self.store.equal_to(
            DomainEventSchema::ContractNumber,
            IndexValue::Numeric(i64::from(contract_number.value())),
        )?;
        Ok(Self::events(records))
    }
}
