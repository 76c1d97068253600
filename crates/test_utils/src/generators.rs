//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating callers, operations, and claim
//! payloads that respect the domain's field rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::ClaimId;
use domain_claims::{ClaimPayload, ClaimStatus, Operation, Role, REQUIRED_FIELDS};

/// Strategy for generating any known role
pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Driver),
        Just(Role::ClaimsAdjuster),
        Just(Role::InsuranceCompanyManager),
    ]
}

/// Strategy for generating any gated operation
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

/// Strategy for generating any claim status
pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Filed),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::CoverageEstablished),
        Just(ClaimStatus::CoverageIsPaid),
    ]
}

/// Strategy for role attribute values that name no known role
pub fn unknown_role_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z]{0,16}".prop_filter("must not be a known role", |value| {
        value.parse::<Role>().is_err()
    })
}

/// Strategy for generating a required field name
pub fn required_field_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(REQUIRED_FIELDS.to_vec())
}

/// Strategy for generating non-negative coverage amounts with two decimals
pub fn coverage_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating claim ids
pub fn claim_id_strategy() -> impl Strategy<Value = ClaimId> {
    "[0-9]{1,8}".prop_map(ClaimId::new)
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,#.]{0,24}"
}

/// Strategy for generating complete claim payloads
pub fn claim_payload_strategy() -> impl Strategy<Value = ClaimPayload> {
    let vehicle = (text(), text(), text(), text(), text());
    let driver = (text(), text(), text(), text(), text());
    let report = (text(), text(), 1950u32..2030, 0u32..10, "20[0-9]{2}-0[1-9]-1[0-9]T1[0-9]:00:00Z");

    (claim_id_strategy(), vehicle, driver, report).prop_map(
        |(
            id,
            (policy_number, car_make, car_model, car_registration, car_license_plate_number),
            (driver_name, driver_license_number, accident_location, injuries_extent, vehicle_damage_extent),
            (accident_description, investigating_officer, year, passengers, accident_date),
        )| ClaimPayload {
            id: Some(id),
            policy_number: Some(policy_number),
            car_make: Some(car_make),
            car_model: Some(car_model),
            car_registration: Some(car_registration),
            car_license_plate_number: Some(car_license_plate_number),
            driver_name: Some(driver_name),
            driver_license_number: Some(driver_license_number),
            accident_location: Some(accident_location),
            injuries_extent: Some(injuries_extent),
            vehicle_damage_extent: Some(vehicle_damage_extent),
            accident_description: Some(accident_description),
            investigating_officer: Some(investigating_officer),
            car_manufacture_year: Some(year),
            number_of_passengers: Some(passengers),
            accident_date: Some(accident_date),
        },
    )
}

/// Strategy for sequences of lifecycle operations applied to one claim
pub fn transition_sequence_strategy() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(
        prop_oneof![
            Just(Operation::RejectClaim),
            Just(Operation::EstablishCoverage),
            Just(Operation::CloseClaim),
        ],
        1..8,
    )
}
