//! Custom Test Assertions
//!
//! Provides assertion helpers for claim results that give more meaningful
//! failure messages than matching on error variants inline.

use std::fmt::Debug;

use rust_decimal::Decimal;

use core_kernel::ClaimId;
use domain_claims::{ClaimError, ClaimRecord, ClaimStatus, InMemoryLedger};

fn expect_err<T: Debug>(result: Result<T, ClaimError>, expected: &str) -> ClaimError {
    match result {
        Ok(value) => panic!("Expected {expected}, got Ok({value:?})"),
        Err(e) => e,
    }
}

/// Asserts that an operation was refused by the authorization gate
pub fn assert_unauthorized<T: Debug>(result: Result<T, ClaimError>) {
    let err = expect_err(result, "Unauthorized");
    assert!(
        matches!(err, ClaimError::Unauthorized { .. }),
        "Expected Unauthorized, got {err:?}"
    );
}

/// Asserts that an operation failed because `id` does not exist
pub fn assert_not_found<T: Debug>(result: Result<T, ClaimError>, id: &ClaimId) {
    let err = expect_err(result, "NotFound");
    match err {
        ClaimError::NotFound(ref missing) => assert_eq!(missing, id),
        other => panic!("Expected NotFound({id}), got {other:?}"),
    }
}

pub fn assert_already_exists<T: Debug>(result: Result<T, ClaimError>, id: &ClaimId) {
    let err = expect_err(result, "AlreadyExists");
    match err {
        ClaimError::AlreadyExists(ref existing) => assert_eq!(existing, id),
        other => panic!("Expected AlreadyExists({id}), got {other:?}"),
    }
}

/// Asserts that filing failed on the named field
pub fn assert_missing_field<T: Debug>(result: Result<T, ClaimError>, field: &str) {
    let err = expect_err(result, "MissingField");
    match err {
        ClaimError::MissingField(name) => assert_eq!(name, field, "Wrong field reported"),
        other => panic!("Expected MissingField({field}), got {other:?}"),
    }
}

/// Asserts that a transition was refused from `current`
pub fn assert_invalid_transition<T: Debug>(result: Result<T, ClaimError>, current: ClaimStatus) {
    let err = expect_err(result, "InvalidTransition");
    assert_eq!(
        err.current_status(),
        Some(current),
        "Expected InvalidTransition from {current}, got {err:?}"
    );
}

/// Asserts that a ledger failure was propagated
pub fn assert_store_failure<T: Debug>(result: Result<T, ClaimError>) {
    let err = expect_err(result, "Store");
    assert!(matches!(err, ClaimError::Store(_)), "Expected Store, got {err:?}");
}

/// Asserts the stored status and coverage amount of a claim
pub fn assert_claim_state(record: &ClaimRecord, status: ClaimStatus, coverage_amount: Decimal) {
    assert_eq!(record.status, status, "Status mismatch for claim {}", record.id);
    assert_eq!(
        record.coverage_amount, coverage_amount,
        "Coverage amount mismatch for claim {}",
        record.id
    );
}

/// Asserts that the ledger document for `id` is byte-identical to `before`
pub async fn assert_document_unchanged(ledger: &InMemoryLedger, id: &ClaimId, before: &Option<Vec<u8>>) {
    let after = ledger.raw(id).await;
    assert_eq!(&after, before, "Ledger document for {id} changed");
}
