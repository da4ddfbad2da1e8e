//! Contract management use cases driven through the application service.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

use portico_app::ContractManagementContext;
use portico_contracts::{ContractEvent, ContractNumber};
use portico_core::DomainError;
use portico_events::HandlerError;

fn signed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap()
}

#[test]
fn contract_numbers_start_at_one_and_increase() {
    let context = ContractManagementContext::new();

    let first = context.service.create_new_contract("Ann").unwrap();
    let second = context.service.create_new_contract("Bob").unwrap();

    assert_eq!(first, ContractNumber::FIRST);
    assert_eq!(second, ContractNumber::new(2));
    assert_eq!(context.service.get_unsigned_contracts().unwrap().len(), 2);
}

#[test]
fn blank_advisor_is_rejected() {
    let context = ContractManagementContext::new();
    let err = context.service.create_new_contract("  ").unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn signature_is_audited_at_its_timestamp() {
    let context = ContractManagementContext::new();
    let number = context.service.create_new_contract("Ann").unwrap();

    let event = context.service.sign_contract_at(number, signed_at()).unwrap();

    assert_eq!(event.signature_date, signed_at());
    assert_eq!(
        context
            .service
            .get_signed_contracts_between(signed_at() - Duration::seconds(1), signed_at() + Duration::seconds(1))
            .unwrap(),
        vec![event.clone()]
    );
    assert!(
        context
            .service
            .get_signed_contracts_between(signed_at() + Duration::seconds(1), signed_at() + Duration::seconds(2))
            .unwrap()
            .is_empty()
    );
    assert_eq!(context.service.get_signed_contracts_in_month(3, 2024).unwrap(), vec![event.clone()]);
    assert!(context.service.get_signed_contracts_in_month(4, 2024).unwrap().is_empty());
    assert_eq!(context.service.get_signature_history(number).unwrap(), vec![event]);
    assert!(context.service.get_contract(number).unwrap().is_signed());
}

#[test]
fn re_signing_is_rejected_without_a_second_audit_record() {
    let context = ContractManagementContext::new();
    let number = context.service.create_new_contract("Ann").unwrap();
    context.service.sign_contract_at(number, signed_at()).unwrap();

    let err = context
        .service
        .sign_contract_at(number, signed_at() + Duration::days(1))
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidTransition(_)));
    assert_eq!(context.service.get_all_signed_contracts().unwrap().len(), 1);
    assert_eq!(
        context.service.get_contract(number).unwrap().signature_date(),
        Some(signed_at())
    );
}

#[test]
fn signing_an_unknown_contract_is_not_found() {
    let context = ContractManagementContext::new();
    let err = context.service.sign_contract(ContractNumber::new(42)).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test]
fn failing_listener_reports_error_but_signature_stands() {
    let context = ContractManagementContext::new();
    let number = context.service.create_new_contract("Ann").unwrap();
    context
        .bus
        .subscribe_any(Arc::new(|_: &ContractEvent| -> Result<(), HandlerError> {
            Err(HandlerError::new("notification failed"))
        }));

    let err = context.service.sign_contract_at(number, signed_at()).unwrap_err();

    assert!(matches!(err, DomainError::HandlerFailure(_)));
    let contract = context.service.get_contract(number).unwrap();
    assert_eq!(contract.signature_date(), Some(signed_at()));
    assert_eq!(context.service.get_signature_history(number).unwrap().len(), 1);
}

#[test]
fn retry_after_listener_failure_records_a_single_signature() {
    let context = ContractManagementContext::new();
    let number = context.service.create_new_contract("Ann").unwrap();
    let failed_once = Arc::new(AtomicBool::new(false));
    let flag = failed_once.clone();
    context
        .bus
        .subscribe_any(Arc::new(move |_: &ContractEvent| -> Result<(), HandlerError> {
            if flag.swap(true, Ordering::SeqCst) {
                Ok(())
            } else {
                Err(HandlerError::new("notification failed"))
            }
        }));

    let first = context.service.sign_contract_at(number, signed_at()).unwrap_err();
    let retry = context
        .service
        .sign_contract_at(number, signed_at() + Duration::days(1))
        .unwrap_err();

    assert!(matches!(first, DomainError::HandlerFailure(_)));
    assert!(matches!(retry, DomainError::InvalidTransition(_)));
    let history = context.service.get_signature_history(number).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].signature_date, signed_at());
    assert!(
        context
            .service
            .get_signed_contracts_between(
                signed_at() + Duration::days(1) - Duration::seconds(1),
                signed_at() + Duration::days(1) + Duration::seconds(1)
            )
            .unwrap()
            .is_empty()
    );
}

#[test]
fn advisor_query_lists_only_their_contracts() {
    let context = ContractManagementContext::new();
    context.service.create_new_contract("Ann").unwrap();
    context.service.create_new_contract("Bob").unwrap();
    context.service.create_new_contract("Ann").unwrap();

    let anns: Vec<u32> = context
        .service
        .get_contracts_by_advisor("Ann")
        .unwrap()
        .iter()
        .map(|c| c.contract_number().value())
        .collect();

    assert_eq!(anns, vec![1, 3]);
}
