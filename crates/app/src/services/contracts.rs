use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use portico_contracts::{
    Contract, ContractAuditService, ContractEvent, ContractNumber, ContractRepository,
    ContractSigned,
};
use portico_core::{DomainError, DomainResult};
use portico_events::EventBus;

/// Contract lifecycle and signature audit queries.
pub struct ContractService {
    contracts: Arc<dyn ContractRepository>,
    audit: Arc<ContractAuditService>,
    bus: Arc<EventBus<ContractEvent>>,
}

impl ContractService {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        audit: Arc<ContractAuditService>,
        bus: Arc<EventBus<ContractEvent>>,
    ) -> Self {
        Self { contracts, audit, bus }
    }

    /// Open an unsigned contract numbered one above the current highest.
    pub fn create_new_contract(&self, advisor: &str) -> DomainResult<ContractNumber> {
        let contract_number = match self.contracts.get_highest_contract_number()? {
            Some(highest) => highest.contract_number().next()?,
            None => ContractNumber::FIRST,
        };

        self.contracts.add(Contract::new(contract_number, advisor)?)?;

        tracing::info!(%contract_number, advisor, "contract created");
        Ok(contract_number)
    }

    /// Sign now.
    pub fn sign_contract(&self, contract_number: ContractNumber) -> DomainResult<ContractSigned> {
        self.sign_contract_at(contract_number, Utc::now())
    }

    /// Sign at `signed_at`. The signature is stored before `ContractSigned`
    /// is published, so a subscriber failure leaves the contract signed.
    pub fn sign_contract_at(
        &self,
        contract_number: ContractNumber,
        signed_at: DateTime<Utc>,
    ) -> DomainResult<ContractSigned> {
        let mut contract = self.contracts.get(contract_number)?;
        let signed = contract.sign(signed_at)?;

        self.contracts.update(contract)?;
        tracing::info!(%contract_number, signature_date = %signed_at, "contract signed");

        self.bus.publish(&signed.clone().into())?;
        Ok(signed)
    }

    pub fn get_contract(&self, contract_number: ContractNumber) -> DomainResult<Contract> {
        self.contracts.get(contract_number)
    }

    pub fn get_unsigned_contracts(&self) -> DomainResult<Vec<Contract>> {
        self.contracts.get_unsigned_contracts()
    }

    pub fn get_signed_contracts(&self) -> DomainResult<Vec<Contract>> {
        self.contracts.get_signed_contracts()
    }

    pub fn get_contracts_by_advisor(&self, advisor: &str) -> DomainResult<Vec<Contract>> {
        self.contracts.get_by_advisor(advisor)
    }

    pub fn get_all_signed_contracts(&self) -> DomainResult<Vec<ContractSigned>> {
        self.audit.all()
    }

    pub fn get_signed_contracts_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<ContractSigned>> {
        self.audit.between(start, end)
    }

    /// Signatures within the UTC calendar month `month` (1-12) of `year`.
    pub fn get_signed_contracts_in_month(&self, month: u32, year: i32) -> DomainResult<Vec<ContractSigned>> {
        let (start, end) = month_bounds(month, year)?;
        self.audit.between(start, end)
    }

    pub fn get_signature_history(&self, contract_number: ContractNumber) -> DomainResult<Vec<ContractSigned>> {
        self.audit.for_contract(contract_number)
    }
}

/// First and last instant of a UTC calendar month, both inclusive.
fn month_bounds(month: u32, year: i32) -> DomainResult<(DateTime<Utc>, DateTime<Utc>)> {
    let first_of = |year: i32, month: u32| {
        Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| DomainError::validation(format!("invalid month {month}/{year}")))
    };

    let start = first_of(year, month)?;
    let next = if month == 12 {
        first_of(year + 1, 1)?
    } else {
        first_of(year, month + 1)?
    };

    Ok((start, next - Duration::nanoseconds(1)))
}
