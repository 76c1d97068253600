//! Inbound claim payload and field validation
//!
//! A driver submits a partially-filled claim document. Every required field is
//! checked in a fixed order and the first missing one is reported.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::ClaimId;
use crate::claim::{ClaimRecord, ClaimStatus};
use crate::error::ClaimError;

/// Required fields in validation order
pub const REQUIRED_FIELDS: [&str; 15] = [
    "policyNumber",
    "carMake",
    "carModel",
    "carRegistration",
    "carLicensePlateNumber",
    "driverName",
    "driverLicenseNumber",
    "accidentLocation",
    "injuriesExtent",
    "vehicleDamageExtent",
    "accidentDescription",
    "investigatingOfficer",
    "carManufactureYear",
    "numberOfPassengers",
    "accidentDate",
];

/// Values that can be blank even when supplied
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

// Zero is a legitimate passenger count.
impl Presence for u32 {
    fn is_present(&self) -> bool {
        true
    }
}

/// Fails `MissingField(name)` unless `value` is supplied and non-blank
pub fn require_field<T: Presence>(value: Option<&T>, name: &'static str) -> Result<(), ClaimError> {
    match value {
        Some(v) if v.is_present() => Ok(()),
        _ => Err(ClaimError::MissingField(name)),
    }
}

fn required<T: Presence>(value: Option<T>, name: &'static str) -> Result<T, ClaimError> {
    match value {
        Some(v) if v.is_present() => Ok(v),
        _ => Err(ClaimError::MissingField(name)),
    }
}

/// Claim document as submitted for filing
///
/// Status and coverage amount are not accepted from the caller; filing always
/// sets `Filed` and zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPayload {
    /// Ledger key; generated when absent or empty
    pub id: Option<ClaimId>,
    pub policy_number: Option<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_registration: Option<String>,
    pub car_license_plate_number: Option<String>,
    pub driver_name: Option<String>,
    pub driver_license_number: Option<String>,
    pub accident_location: Option<String>,
    pub injuries_extent: Option<String>,
    pub vehicle_damage_extent: Option<String>,
    pub accident_description: Option<String>,
    pub investigating_officer: Option<String>,
    pub car_manufacture_year: Option<u32>,
    pub number_of_passengers: Option<u32>,
    pub accident_date: Option<String>,
}

impl ClaimPayload {
    /// Supplied id, if any
    pub fn claim_id(&self) -> Option<&ClaimId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }

    /// Checks every required field, reporting the first missing one
    pub fn validate(&self) -> Result<(), ClaimError> {
        require_field(self.policy_number.as_ref(), "policyNumber")?;
        require_field(self.car_make.as_ref(), "carMake")?;
        require_field(self.car_model.as_ref(), "carModel")?;
        require_field(self.car_registration.as_ref(), "carRegistration")?;
        require_field(self.car_license_plate_number.as_ref(), "carLicensePlateNumber")?;
        require_field(self.driver_name.as_ref(), "driverName")?;
        require_field(self.driver_license_number.as_ref(), "driverLicenseNumber")?;
        require_field(self.accident_location.as_ref(), "accidentLocation")?;
        require_field(self.injuries_extent.as_ref(), "injuriesExtent")?;
        require_field(self.vehicle_damage_extent.as_ref(), "vehicleDamageExtent")?;
        require_field(self.accident_description.as_ref(), "accidentDescription")?;
        require_field(self.investigating_officer.as_ref(), "investigatingOfficer")?;
        require_field(self.car_manufacture_year.as_ref(), "carManufactureYear")?;
        require_field(self.number_of_passengers.as_ref(), "numberOfPassengers")?;
        require_field(self.accident_date.as_ref(), "accidentDate")?;
        Ok(())
    }

    /// Builds the `Filed` record stored under `id`
    ///
    /// Fields are checked in the same order as [`ClaimPayload::validate`].
    pub fn into_record(self, id: ClaimId) -> Result<ClaimRecord, ClaimError> {
        Ok(ClaimRecord {
            id,
            policy_number: required(self.policy_number, "policyNumber")?,
            car_make: required(self.car_make, "carMake")?,
            car_model: required(self.car_model, "carModel")?,
            car_registration: required(self.car_registration, "carRegistration")?,
            car_license_plate_number: required(self.car_license_plate_number, "carLicensePlateNumber")?,
            driver_name: required(self.driver_name, "driverName")?,
            driver_license_number: required(self.driver_license_number, "driverLicenseNumber")?,
            accident_location: required(self.accident_location, "accidentLocation")?,
            injuries_extent: required(self.injuries_extent, "injuriesExtent")?,
            vehicle_damage_extent: required(self.vehicle_damage_extent, "vehicleDamageExtent")?,
            accident_description: required(self.accident_description, "accidentDescription")?,
            investigating_officer: required(self.investigating_officer, "investigatingOfficer")?,
            car_manufacture_year: required(self.car_manufacture_year, "carManufactureYear")?,
            number_of_passengers: required(self.number_of_passengers, "numberOfPassengers")?,
            accident_date: required(self.accident_date, "accidentDate")?,
            coverage_amount: Decimal::ZERO,
            status: ClaimStatus::Filed,
        })
    }
}

/// Submitted claim document before its fields are typed
///
/// Only the id is read up front so the existence check can run before any
/// field is decoded.
#[derive(Debug, Clone)]
pub struct ClaimSubmission {
    document: Map<String, Value>,
}

impl ClaimSubmission {
    /// Parses `json`, which must be a JSON object
    pub fn parse(json: &str) -> Result<Self, ClaimError> {
        match serde_json::from_str(json) {
            Ok(Value::Object(document)) => Ok(Self { document }),
            Ok(_) => Err(ClaimError::MalformedPayload("expected a JSON object".to_string())),
            Err(e) => Err(ClaimError::MalformedPayload(e.to_string())),
        }
    }

    /// Supplied id; absent, `null` and empty all read as `None`
    pub fn claim_id(&self) -> Result<Option<ClaimId>, ClaimError> {
        match self.document.get("id") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(id)) if id.is_empty() => Ok(None),
            Some(Value::String(id)) => Ok(Some(ClaimId::new(id.as_str()))),
            Some(other) => Err(ClaimError::MalformedPayload(format!(
                "invalid type for id: {other}, expected a string"
            ))),
        }
    }

    /// Decodes the remaining fields
    pub fn decode(self) -> Result<ClaimPayload, ClaimError> {
        serde_json::from_value(Value::Object(self.document))
            .map_err(|e| ClaimError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = r#"{
        "id": "1005",
        "policyNumber": "P11123415",
        "carMake": "BMW",
        "carModel": "X6",
        "carRegistration": "CAN",
        "carLicensePlateNumber": "CCDN5",
        "driverName": "John Doe",
        "driverLicenseNumber": "112BBA",
        "accidentLocation": "Toronto, ON",
        "injuriesExtent": "Mild",
        "vehicleDamageExtent": "Mild",
        "accidentDescription": "Mild crash at a intersection",
        "investigatingOfficer": "Rob Johnson, #123",
        "carManufactureYear": 2017,
        "numberOfPassengers": 3,
        "accidentDate": "2021-06-30T21:06:16.727Z"
    }"#;

    fn decode(json: &str) -> Result<ClaimPayload, ClaimError> {
        ClaimSubmission::parse(json)?.decode()
    }

    fn without(fields: &[&str]) -> ClaimPayload {
        let mut value: Value = serde_json::from_str(COMPLETE).unwrap();
        for field in fields {
            value.as_object_mut().unwrap().remove(*field);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_complete_payload_validates() {
        let payload = decode(COMPLETE).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.claim_id(), Some(&ClaimId::new("1005")));

        let record = payload.into_record(ClaimId::new("1005")).unwrap();
        assert_eq!(record.status, ClaimStatus::Filed);
        assert_eq!(record.coverage_amount, Decimal::ZERO);
        assert_eq!(record.car_manufacture_year, 2017);
    }

    #[test]
    fn test_empty_string_is_missing() {
        let mut payload = decode(COMPLETE).unwrap();
        payload.driver_name = Some(String::new());
        let err = payload.validate().unwrap_err();
        assert!(matches!(err, ClaimError::MissingField("driverName")));
        assert_eq!(err.to_string(), "The 'driverName' field is required.");
    }

    #[test]
    fn test_null_is_missing() {
        let json = COMPLETE.replace("\"carModel\": \"X6\"", "\"carModel\": null");
        let payload = decode(&json).unwrap();
        assert!(matches!(payload.validate(), Err(ClaimError::MissingField("carModel"))));
    }

    #[test]
    fn test_first_missing_field_reported() {
        let payload = ClaimPayload::default();
        assert!(matches!(payload.validate(), Err(ClaimError::MissingField("policyNumber"))));

        let payload = without(&["accidentDate", "carMake"]);
        assert!(matches!(payload.validate(), Err(ClaimError::MissingField("carMake"))));
    }

    #[test]
    fn test_into_record_uses_same_order_as_validate() {
        for field in REQUIRED_FIELDS {
            let payload = without(&[field]);
            let from_validate = payload.validate().unwrap_err();
            let from_record = payload.into_record(ClaimId::new("1005")).unwrap_err();
            assert_eq!(from_validate.to_string(), from_record.to_string());
        }
    }

    #[test]
    fn test_zero_passengers_is_present() {
        let json = COMPLETE.replace("\"numberOfPassengers\": 3", "\"numberOfPassengers\": 0");
        let payload = decode(&json).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_negative_integer_is_malformed() {
        let json = COMPLETE.replace("\"numberOfPassengers\": 3", "\"numberOfPassengers\": -1");
        let err = decode(&json).unwrap_err();
        assert!(matches!(err, ClaimError::MalformedPayload(_)));
    }

    #[test]
    fn test_empty_id_counts_as_absent() {
        let json = COMPLETE.replace("\"id\": \"1005\"", "\"id\": \"\"");
        let payload = decode(&json).unwrap();
        assert_eq!(payload.claim_id(), None);
    }

    #[test]
    fn test_submission_id_is_read_before_fields() {
        let json = COMPLETE.replace("\"numberOfPassengers\": 3", "\"numberOfPassengers\": \"many\"");
        let submission = ClaimSubmission::parse(&json).unwrap();
        assert_eq!(submission.claim_id().unwrap(), Some(ClaimId::new("1005")));
        assert!(matches!(submission.decode(), Err(ClaimError::MalformedPayload(_))));
    }

    #[test]
    fn test_submission_id_forms() {
        let id_of = |json: &str| ClaimSubmission::parse(json).unwrap().claim_id();
        assert_eq!(id_of(r#"{"policyNumber": "P1"}"#).unwrap(), None);
        assert_eq!(id_of(r#"{"id": null}"#).unwrap(), None);
        assert_eq!(id_of(r#"{"id": ""}"#).unwrap(), None);
        assert!(matches!(id_of(r#"{"id": 1005}"#), Err(ClaimError::MalformedPayload(_))));
    }

    #[test]
    fn test_submission_must_be_an_object() {
        assert!(matches!(ClaimSubmission::parse("[1, 2]"), Err(ClaimError::MalformedPayload(_))));
        assert!(matches!(ClaimSubmission::parse("{ not json"), Err(ClaimError::MalformedPayload(_))));
    }
}
