//! Pre-built Test Fixtures
//!
//! Provides ready-to-use claims, payloads, and callers. The values mirror a
//! typical filing so scenario tests read like the business flow.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::ClaimId;
use domain_claims::{
    ClaimLifecycleService, ClaimPayload, ClaimRecord, ClaimStatus, InMemoryLedger, Role,
    StaticIdentity,
};

use crate::builders::ClaimPayloadBuilder;

/// Fixture for claim test data
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Claim id used by the standard scenarios
    pub fn claim_id() -> ClaimId {
        ClaimId::new("1005")
    }

    /// Id that is never stored
    pub fn unknown_id() -> ClaimId {
        ClaimId::new("9999")
    }

    /// Standard coverage amount
    pub fn coverage_amount() -> Decimal {
        dec!(250.0)
    }

    /// Complete payload for claim `id`
    pub fn payload(id: &str) -> ClaimPayload {
        ClaimPayload {
            id: Some(ClaimId::new(id)),
            policy_number: Some("P11123415".to_string()),
            car_make: Some("BMW".to_string()),
            car_model: Some("X6".to_string()),
            car_registration: Some("CAN".to_string()),
            car_license_plate_number: Some("CCDN5".to_string()),
            driver_name: Some("John Doe".to_string()),
            driver_license_number: Some("112BBA".to_string()),
            accident_location: Some("Toronto, ON".to_string()),
            injuries_extent: Some("Mild".to_string()),
            vehicle_damage_extent: Some("Mild".to_string()),
            accident_description: Some("Mild crash at a intersection".to_string()),
            investigating_officer: Some("Rob Johnson, #123".to_string()),
            car_manufacture_year: Some(2017),
            number_of_passengers: Some(3),
            accident_date: Some("2021-06-30T21:06:16.727Z".to_string()),
        }
    }

    /// Complete payload for the standard claim id
    pub fn standard_payload() -> ClaimPayload {
        Self::payload("1005")
    }

    /// Standard payload with one field removed
    pub fn payload_without(field: &str) -> ClaimPayload {
        ClaimPayloadBuilder::from_payload(Self::standard_payload())
            .without(field)
            .build()
    }

    /// Standard payload as a camelCase JSON document
    pub fn payload_json(id: &str) -> String {
        serde_json::to_string(&Self::payload(id)).unwrap_or_default()
    }

    /// Record as stored right after filing
    pub fn filed_record(id: &str) -> ClaimRecord {
        let id = ClaimId::new(id);
        Self::payload(id.as_str())
            .into_record(id)
            .unwrap_or_else(|e| panic!("fixture payload must be complete: {e}"))
    }

    /// Record in `status`, with a coverage amount when the status implies one
    pub fn record_in(id: &str, status: ClaimStatus) -> ClaimRecord {
        let mut record = Self::filed_record(id);
        record.status = status;
        if matches!(status, ClaimStatus::CoverageEstablished | ClaimStatus::CoverageIsPaid) {
            record.coverage_amount = Self::coverage_amount();
        }
        record
    }
}

/// Fixture for callers
pub struct CallerFixtures;

impl CallerFixtures {
    pub fn driver() -> StaticIdentity {
        StaticIdentity::with_role(Role::Driver).with_id("driver-01")
    }

    pub fn adjuster() -> StaticIdentity {
        StaticIdentity::with_role(Role::ClaimsAdjuster).with_id("adjuster-01")
    }

    pub fn manager() -> StaticIdentity {
        StaticIdentity::with_role(Role::InsuranceCompanyManager).with_id("manager-01")
    }

    pub fn for_role(role: Role) -> StaticIdentity {
        match role {
            Role::Driver => Self::driver(),
            Role::ClaimsAdjuster => Self::adjuster(),
            Role::InsuranceCompanyManager => Self::manager(),
        }
    }

    /// Caller whose role attribute names no known role
    pub fn unknown_role() -> StaticIdentity {
        StaticIdentity::new().attribute_value("role", "invalidRole")
    }

    /// Caller without any role attribute
    pub fn anonymous() -> StaticIdentity {
        StaticIdentity::new()
    }
}

/// Service over a fresh in-memory ledger, returning both
pub fn service_with_ledger() -> (ClaimLifecycleService, InMemoryLedger) {
    let ledger = InMemoryLedger::new();
    let service = ClaimLifecycleService::new(Arc::new(ledger.clone()));
    (service, ledger)
}

/// Service whose ledger already holds `records`
pub async fn service_with_records(
    records: impl IntoIterator<Item = ClaimRecord>,
) -> (ClaimLifecycleService, InMemoryLedger) {
    let (service, ledger) = service_with_ledger();
    for record in records {
        ledger
            .seed(&record)
            .await
            .unwrap_or_else(|e| panic!("failed to seed {}: {e}", record.id));
    }
    (service, ledger)
}
