//! Test Data Builders
//!
//! Provides a builder for claim payloads. Unset fields are filled with fake
//! but plausible data so tests only spell out what they care about.

use chrono::{Duration, SecondsFormat, Utc};
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;

use core_kernel::ClaimId;
use domain_claims::ClaimPayload;

const CAR_MAKES: [&str; 6] = ["BMW", "Toyota", "Honda", "Ford", "Volvo", "Audi"];
const CAR_MODELS: [&str; 6] = ["X6", "Corolla", "Civic", "Focus", "XC90", "A4"];
const EXTENTS: [&str; 3] = ["None", "Mild", "Severe"];

fn pick(options: &[&str]) -> String {
    let index: usize = (0..options.len()).fake();
    options[index].to_string()
}

/// Builder for claim payloads
pub struct ClaimPayloadBuilder {
    payload: ClaimPayload,
}

impl Default for ClaimPayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimPayloadBuilder {
    /// Creates a builder with every required field filled with fake data
    pub fn new() -> Self {
        let policy: u32 = (10_000_000u32..99_999_999).fake();
        let plate: u32 = (1000u32..9999).fake();
        let licence: u32 = (100_000u32..999_999).fake();
        let badge: u32 = (100u32..999).fake();
        let days_ago: i64 = (1i64..3650).fake();
        let officer: String = Name().fake();

        Self {
            payload: ClaimPayload {
                id: None,
                policy_number: Some(format!("P{policy}")),
                car_make: Some(pick(&CAR_MAKES)),
                car_model: Some(pick(&CAR_MODELS)),
                car_registration: Some("CAN".to_string()),
                car_license_plate_number: Some(format!("CC{plate}")),
                driver_name: Some(Name().fake::<String>()),
                driver_license_number: Some(format!("DL{licence}")),
                accident_location: Some(CityName().fake::<String>()),
                injuries_extent: Some(pick(&EXTENTS)),
                vehicle_damage_extent: Some(pick(&EXTENTS)),
                accident_description: Some(Sentence(3..8).fake::<String>()),
                investigating_officer: Some(format!("{officer}, #{badge}")),
                car_manufacture_year: Some((1990u32..2025).fake::<u32>()),
                number_of_passengers: Some((0u32..6).fake::<u32>()),
                accident_date: Some(
                    (Utc::now() - Duration::days(days_ago)).to_rfc3339_opts(SecondsFormat::Millis, true),
                ),
            },
        }
    }

    /// Starts from an existing payload instead of fake data
    pub fn from_payload(payload: ClaimPayload) -> Self {
        Self { payload }
    }

    /// Sets the claim id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.payload.id = Some(ClaimId::new(id));
        self
    }

    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.payload.policy_number = Some(number.into());
        self
    }

    pub fn with_driver_name(mut self, name: impl Into<String>) -> Self {
        self.payload.driver_name = Some(name.into());
        self
    }

    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.payload.number_of_passengers = Some(passengers);
        self
    }

    pub fn with_accident_date(mut self, date: impl Into<String>) -> Self {
        self.payload.accident_date = Some(date.into());
        self
    }

    /// Removes a field by its ledger name; unknown names are ignored
    pub fn without(mut self, field: &str) -> Self {
        let p = &mut self.payload;
        match field {
            "id" => p.id = None,
            "policyNumber" => p.policy_number = None,
            "carMake" => p.car_make = None,
            "carModel" => p.car_model = None,
            "carRegistration" => p.car_registration = None,
            "carLicensePlateNumber" => p.car_license_plate_number = None,
            "driverName" => p.driver_name = None,
            "driverLicenseNumber" => p.driver_license_number = None,
            "accidentLocation" => p.accident_location = None,
            "injuriesExtent" => p.injuries_extent = None,
            "vehicleDamageExtent" => p.vehicle_damage_extent = None,
            "accidentDescription" => p.accident_description = None,
            "investigatingOfficer" => p.investigating_officer = None,
            "carManufactureYear" => p.car_manufacture_year = None,
            "numberOfPassengers" => p.number_of_passengers = None,
            "accidentDate" => p.accident_date = None,
            _ => {}
        }
        self
    }

    /// Sets a string field to the empty string by its ledger name
    pub fn blank(mut self, field: &str) -> Self {
        // Numeric fields have no blank form.
        if matches!(field, "carManufactureYear" | "numberOfPassengers") {
            return self.without(field);
        }
        let p = &mut self.payload;
        let slot = match field {
            "policyNumber" => &mut p.policy_number,
            "carMake" => &mut p.car_make,
            "carModel" => &mut p.car_model,
            "carRegistration" => &mut p.car_registration,
            "carLicensePlateNumber" => &mut p.car_license_plate_number,
            "driverName" => &mut p.driver_name,
            "driverLicenseNumber" => &mut p.driver_license_number,
            "accidentLocation" => &mut p.accident_location,
            "injuriesExtent" => &mut p.injuries_extent,
            "vehicleDamageExtent" => &mut p.vehicle_damage_extent,
            "accidentDescription" => &mut p.accident_description,
            "investigatingOfficer" => &mut p.investigating_officer,
            "accidentDate" => &mut p.accident_date,
            _ => return self,
        };
        *slot = Some(String::new());
        self
    }

    pub fn build(self) -> ClaimPayload {
        self.payload
    }

    /// Builds the payload as a camelCase JSON document
    pub fn build_json(self) -> String {
        serde_json::to_string(&self.payload).unwrap_or_default()
    }
}
