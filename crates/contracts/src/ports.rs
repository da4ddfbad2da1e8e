//! Outbound ports of contract management, implemented by infrastructure adapters.

use chrono::{DateTime, Utc};

use portico_core::DomainResult;

use crate::contract::{Contract, ContractNumber, ContractSigned};

/// Persistent collection of contracts, keyed by contract number.
pub trait ContractRepository: Send + Sync {
    /// Fails with `DuplicateKey` if the number is taken.
    fn add(&self, contract: Contract) -> DomainResult<()>;

    /// Fails with `NotFound` if the contract does not exist.
    fn update(&self, contract: Contract) -> DomainResult<()>;

    /// Fails with `NotFound` if the contract does not exist.
    fn remove(&self, contract_number: ContractNumber) -> DomainResult<()>;

    /// Fails with `NotFound` if the contract does not exist.
    fn get(&self, contract_number: ContractNumber) -> DomainResult<Contract>;

    fn get_all(&self) -> DomainResult<Vec<Contract>>;

    fn get_by_advisor(&self, advisor: &str) -> DomainResult<Vec<Contract>>;

    fn get_signed_contracts(&self) -> DomainResult<Vec<Contract>>;

    fn get_unsigned_contracts(&self) -> DomainResult<Vec<Contract>>;

    /// The contract with the highest number, if any contract exists.
    fn get_highest_contract_number(&self) -> DomainResult<Option<Contract>>;
}

/// Append-only log of [`ContractSigned`] events.
///
/// Recording the same event twice stores it twice.
pub trait DomainEventStore: Send + Sync {
    fn add(&self, event: ContractSigned) -> DomainResult<()>;

    /// Events signed within `[start, end]`, oldest first.
    fn get_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Vec<ContractSigned>>;

    fn get_all(&self) -> DomainResult<Vec<ContractSigned>>;

    fn get_for_contract(&self, contract_number: ContractNumber) -> DomainResult<Vec<ContractSigned>>;
}
