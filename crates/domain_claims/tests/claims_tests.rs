//! Tests for the claim record, payload validation, and access policy

use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::ClaimId;
use domain_claims::{
    AccessPolicy, AuthorizationGate, ClaimError, ClaimRecord, ClaimStatus, ClaimSubmission,
    Operation, Role, StaticIdentity, REQUIRED_FIELDS,
};
use test_utils::{
    assert_missing_field, required_field_strategy, role_strategy, status_strategy,
    unknown_role_strategy, operation_strategy, CallerFixtures, ClaimFixtures, ClaimPayloadBuilder,
};

// ============================================================================
// Claim Record Tests
// ============================================================================

mod record_tests {
    use super::*;

    #[test]
    fn test_filed_record_defaults() {
        let record = ClaimFixtures::filed_record("1005");
        assert_eq!(record.id, ClaimId::new("1005"));
        assert_eq!(record.status, ClaimStatus::Filed);
        assert_eq!(record.coverage_amount, dec!(0));
    }

    #[test]
    fn test_full_lifecycle_on_record() {
        let mut record = ClaimFixtures::filed_record("1005");
        record.establish_coverage(dec!(250.0)).unwrap();
        record.close().unwrap();

        assert_eq!(record.status, ClaimStatus::CoverageIsPaid);
        assert_eq!(record.coverage_amount, dec!(250.0));
        assert!(record.status.is_terminal());
    }

    #[test]
    fn test_rejected_claim_cannot_be_covered() {
        let mut record = ClaimFixtures::filed_record("1005");
        record.reject().unwrap();
        let err = record.establish_coverage(dec!(10)).unwrap_err();
        assert_eq!(err.current_status(), Some(ClaimStatus::Rejected));
        assert_eq!(record.coverage_amount, dec!(0));
    }

    #[test]
    fn test_filed_claim_cannot_be_closed() {
        let mut record = ClaimFixtures::filed_record("1005");
        let err = record.close().unwrap_err();
        assert_eq!(err.to_string(), "Cannot close a claim in status Filed");
    }

    #[test]
    fn test_ledger_document_round_trip_keeps_amount() {
        let record = ClaimFixtures::record_in("1005", ClaimStatus::CoverageEstablished);
        let bytes = record.to_bytes().unwrap();
        let decoded = ClaimRecord::from_bytes(&record.id, &bytes).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.coverage_amount, dec!(250.0));
    }

    #[test]
    fn test_numeric_coverage_amount_is_accepted_on_decode() {
        let mut value = serde_json::to_value(ClaimFixtures::filed_record("1005")).unwrap();
        value["coverageAmount"] = serde_json::json!(100.5);
        let bytes = serde_json::to_vec(&value).unwrap();

        let decoded = ClaimRecord::from_bytes(&ClaimId::new("1005"), &bytes).unwrap();
        assert_eq!(decoded.coverage_amount, dec!(100.5));
    }

    #[test]
    fn test_unknown_status_is_corrupt() {
        let mut value = serde_json::to_value(ClaimFixtures::filed_record("1005")).unwrap();
        value["status"] = serde_json::json!("Archived");
        let bytes = serde_json::to_vec(&value).unwrap();

        let err = ClaimRecord::from_bytes(&ClaimId::new("1005"), &bytes).unwrap_err();
        assert!(matches!(err, ClaimError::CorruptRecord { .. }));
    }

    proptest! {
        #[test]
        fn prop_status_never_moves_backwards(from in status_strategy(), to in status_strategy()) {
            if from.can_transition_to(to) {
                prop_assert!(to.code() > from.code());
                prop_assert!(!from.is_terminal());
            }
        }
    }
}

// ============================================================================
// Payload Validation Tests
// ============================================================================

mod payload_tests {
    use super::*;

    #[test]
    fn test_builder_payload_is_complete() {
        let payload = ClaimPayloadBuilder::new().build();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.claim_id(), None);
    }

    #[test]
    fn test_builder_json_decodes() {
        let json = ClaimPayloadBuilder::new().with_id("2001").build_json();
        let payload = ClaimSubmission::parse(&json).and_then(ClaimSubmission::decode).unwrap();
        assert_eq!(payload.claim_id(), Some(&ClaimId::new("2001")));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let json = ClaimFixtures::payload_json("1005").replace("2017", "\"twenty\"");
        assert!(matches!(
            ClaimSubmission::parse(&json).and_then(ClaimSubmission::decode),
            Err(ClaimError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_every_required_field_is_checked() {
        for field in REQUIRED_FIELDS {
            let payload = ClaimFixtures::payload_without(field);
            assert_missing_field(payload.validate(), field);
        }
    }

    proptest! {
        #[test]
        fn prop_single_blank_field_is_reported(field in required_field_strategy()) {
            let payload = ClaimPayloadBuilder::new().blank(field).build();
            match payload.validate() {
                Err(ClaimError::MissingField(name)) => {
                    prop_assert_eq!(name, field);
                }
                other => {
                    prop_assert!(false, "Expected MissingField({}), got {:?}", field, other);
                }
            }
        }
    }
}

// ============================================================================
// Access Policy Tests
// ============================================================================

mod access_tests {
    use super::*;

    #[test]
    fn test_default_table_for_fixture_callers() {
        let gate = AuthorizationGate::default();

        assert!(gate.authorize(&CallerFixtures::driver(), Operation::FileClaim).is_ok());
        assert!(gate.authorize(&CallerFixtures::adjuster(), Operation::EstablishCoverage).is_ok());
        assert!(gate.authorize(&CallerFixtures::manager(), Operation::CloseClaim).is_ok());
        assert!(gate.authorize(&CallerFixtures::manager(), Operation::RejectClaim).is_ok());

        assert!(gate.authorize(&CallerFixtures::driver(), Operation::RejectClaim).is_err());
        assert!(gate.authorize(&CallerFixtures::adjuster(), Operation::CloseClaim).is_err());
        assert!(gate.authorize(&CallerFixtures::anonymous(), Operation::GetClaim).is_err());
    }

    #[test]
    fn test_adjuster_rejection_only_gate() {
        let gate = AuthorizationGate::new(AccessPolicy::adjuster_rejection_only());
        assert!(gate.authorize(&CallerFixtures::adjuster(), Operation::RejectClaim).is_ok());
        assert!(gate.authorize(&CallerFixtures::manager(), Operation::RejectClaim).is_err());
    }

    proptest! {
        #[test]
        fn prop_gate_agrees_with_policy(role in role_strategy(), operation in operation_strategy()) {
            let policy = AccessPolicy::default();
            let gate = AuthorizationGate::new(policy.clone());
            let allowed = gate.authorize(&StaticIdentity::with_role(role), operation).is_ok();
            prop_assert_eq!(allowed, policy.permits(role, operation));
        }

        #[test]
        fn prop_unknown_roles_are_always_refused(value in unknown_role_strategy(), operation in operation_strategy()) {
            let gate = AuthorizationGate::new(AccessPolicy::default());
            let caller = StaticIdentity::new().attribute_value("role", value);
            prop_assert!(gate.authorize(&caller, operation).is_err());
        }

        #[test]
        fn prop_empty_policy_refuses_everyone(role in role_strategy(), operation in operation_strategy()) {
            let policy = AccessPolicy::default().allow(operation, Vec::<Role>::new());
            let gate = AuthorizationGate::new(policy);
            prop_assert!(gate.authorize(&StaticIdentity::with_role(role), operation).is_err());
        }
    }
}
