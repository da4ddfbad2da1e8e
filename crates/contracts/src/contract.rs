use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portico_core::{AggregateRoot, DomainError, DomainResult, ValueObject};
use portico_events::{Event, EventKind};

/// Sequential contract identifier, starting at 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractNumber(u32);

impl ContractNumber {
    pub const FIRST: ContractNumber = ContractNumber(1);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The number following this one.
    pub fn next(&self) -> DomainResult<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or_else(|| DomainError::validation("contract numbers exhausted"))
    }
}

impl ValueObject for ContractNumber {}

impl core::fmt::Display for ContractNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Contract.
///
/// `Unsigned -> Signed` is the only transition and `Signed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    contract_number: ContractNumber,
    advisor: String,
    signature_date: Option<DateTime<Utc>>,
}

impl Contract {
    /// Factory: an unsigned contract handled by `advisor`.
    pub fn new(contract_number: ContractNumber, advisor: impl Into<String>) -> DomainResult<Self> {
        let advisor = advisor.into();
        if advisor.trim().is_empty() {
            return Err(DomainError::validation("advisor cannot be empty"));
        }
        Ok(Self {
            contract_number,
            advisor,
            signature_date: None,
        })
    }

    pub fn contract_number(&self) -> ContractNumber {
        self.contract_number
    }

    pub fn advisor(&self) -> &str {
        &self.advisor
    }

    /// Hand the contract over to another advisor.
    pub fn set_advisor(&mut self, advisor: impl Into<String>) -> DomainResult<()> {
        let advisor = advisor.into();
        if advisor.trim().is_empty() {
            return Err(DomainError::validation("advisor cannot be empty"));
        }
        self.advisor = advisor;
        Ok(())
    }

    pub fn is_signed(&self) -> bool {
        self.signature_date.is_some()
    }

    pub fn signature_date(&self) -> Option<DateTime<Utc>> {
        self.signature_date
    }

    /// Sign the contract at `signed_at`.
    ///
    /// Signing twice is rejected with `InvalidTransition`; the original
    /// signature date is kept.
    pub fn sign(&mut self, signed_at: DateTime<Utc>) -> DomainResult<ContractSigned> {
        if let Some(existing) = self.signature_date {
            return Err(DomainError::invalid_transition(format!(
                "contract {} was already signed at {existing}",
                self.contract_number
            )));
        }

        self.signature_date = Some(signed_at);
        Ok(ContractSigned {
            contract_number: self.contract_number,
            signature_date: signed_at,
        })
    }
}

impl AggregateRoot for Contract {
    type Id = ContractNumber;

    fn id(&self) -> &Self::Id {
        &self.contract_number
    }
}

/// Event: a contract moved from unsigned to signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSigned {
    pub contract_number: ContractNumber,
    pub signature_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    ContractSigned(ContractSigned),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractEventKind {
    ContractSigned,
}

impl EventKind for ContractEventKind {}

impl Event for ContractEvent {
    type Kind = ContractEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            ContractEvent::ContractSigned(_) => ContractEventKind::ContractSigned,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            ContractEvent::ContractSigned(_) => "ContractSigned",
        }
    }
}

impl From<ContractSigned> for ContractEvent {
    fn from(value: ContractSigned) -> Self {
        ContractEvent::ContractSigned(value)
    }
}
