//! Contract management tutorial domain.
//!
//! Contracts are created for an advisor and signed exactly once. Signing
//! emits [`ContractSigned`], which [`ContractAuditService`] records for
//! later time-range queries.

pub mod audit;
pub mod contract;
pub mod ports;

pub use audit::ContractAuditService;
pub use contract::{Contract, ContractEvent, ContractEventKind, ContractNumber, ContractSigned};
pub use ports::{ContractRepository, DomainEventStore};
