use portico_contracts::{Contract, ContractNumber, ContractRepository};
use portico_core::{DomainError, DomainResult};

use crate::object_store::{InMemoryObjectStore, IndexValue, MetaTag, MetadataSchema, ObjectStore};

/// Secondary indexes over contracts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractSchema {
    ContractNumber,
    ContractSigned,
    Advisor,
}

impl MetadataSchema<Contract> for ContractSchema {
    const ALL: &'static [Self] = &[
        ContractSchema::ContractNumber,
        ContractSchema::ContractSigned,
        ContractSchema::Advisor,
    ];

    fn tag(self) -> MetaTag<Contract> {
        match self {
            ContractSchema::ContractNumber => MetaTag::Numeric(|c| i64::from(c.contract_number().value())),
            ContractSchema::ContractSigned => MetaTag::Boolean(Contract::is_signed),
            ContractSchema::Advisor => MetaTag::Text(|c| c.advisor().to_owned()),
        }
    }
}

#[derive(Debug)]
pub struct InMemoryContractRepository {
    store: InMemoryObjectStore<Contract, ContractNumber, ContractSchema>,
}

impl InMemoryContractRepository {
    pub fn new() -> Self {
        Self {
            store: InMemoryObjectStore::new("contracts", Contract::contract_number),
        }
    }
}

impl Default for InMemoryContractRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractRepository for InMemoryContractRepository {
    fn add(&self, contract: Contract) -> DomainResult<()> {
        Ok(self.store.add(contract)?)
    }

    fn update(&self, contract: Contract) -> DomainResult<()> {
        Ok(self.store.update(contract)?)
    }

    fn remove(&self, contract_number: ContractNumber) -> DomainResult<()> {
        self.store.remove(&contract_number)?;
        Ok(())
    }

    fn get(&self, contract_number: ContractNumber) -> DomainResult<Contract> {
        self.store
            .get(&contract_number)?
            .ok_or_else(|| DomainError::not_found(format!("contract {contract_number}")))
    }

    fn get_all(&self) -> DomainResult<Vec<Contract>> {
        Ok(self.store.get_all()?)
    }

    fn get_by_advisor(&self, advisor: &str) -> DomainResult<Vec<Contract>> {
        Ok(self.store.equal_to(ContractSchema::Advisor, IndexValue::from(advisor))?)
    }

    fn get_signed_contracts(&self) -> DomainResult<Vec<Contract>> {
        Ok(self.store.equal_to(ContractSchema::ContractSigned, IndexValue::Boolean(true))?)
    }

    fn get_unsigned_contracts(&self) -> DomainResult<Vec<Contract>> {
        Ok(self.store.equal_to(ContractSchema::ContractSigned, IndexValue::Boolean(false))?)
    }

    fn get_highest_contract_number(&self) -> DomainResult<Option<Contract>> {
        Ok(self
            .store
            .descending(ContractSchema::ContractNumber, 1)?
            .into_iter()
            .next())
    }
}
