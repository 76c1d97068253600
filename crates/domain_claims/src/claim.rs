//! Claim record and status machine

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use crate::error::ClaimError;
use crate::roles::Operation;

/// Claim status
///
/// ```text
/// Filed -> Rejected
/// Filed -> CoverageEstablished -> CoverageIsPaid
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Recorded, awaiting an adjuster decision
    Filed,
    /// Denied (terminal)
    Rejected,
    /// Approved with a payout amount
    CoverageEstablished,
    /// Payout closed out (terminal)
    CoverageIsPaid,
}

impl ClaimStatus {
    /// Numeric code used by earlier ledger documents. `0` meant "no claim".
    pub fn code(&self) -> u8 {
        match self {
            ClaimStatus::Filed => 1,
            ClaimStatus::Rejected => 2,
            ClaimStatus::CoverageEstablished => 3,
            ClaimStatus::CoverageIsPaid => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ClaimStatus::Filed),
            2 => Some(ClaimStatus::Rejected),
            3 => Some(ClaimStatus::CoverageEstablished),
            4 => Some(ClaimStatus::CoverageIsPaid),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }

    /// Statuses reachable in one transition
    pub fn successors(&self) -> &'static [ClaimStatus] {
        match self {
            ClaimStatus::Filed => &[ClaimStatus::Rejected, ClaimStatus::CoverageEstablished],
            ClaimStatus::CoverageEstablished => &[ClaimStatus::CoverageIsPaid],
            ClaimStatus::Rejected | ClaimStatus::CoverageIsPaid => &[],
        }
    }

    /// Checks if transition is valid
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (*self, target),
            (Filed, Rejected) |
            (Filed, CoverageEstablished) |
            (CoverageEstablished, CoverageIsPaid)
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimStatus::Filed => "Filed",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::CoverageEstablished => "CoverageEstablished",
            ClaimStatus::CoverageIsPaid => "CoverageIsPaid",
        };
        f.write_str(name)
    }
}

/// A filed car accident insurance claim as stored on the ledger
///
/// Field names are serialized in camelCase and must stay stable: they are the
/// keys of the ledger document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    /// Ledger key, immutable once assigned
    pub id: ClaimId,
    pub policy_number: String,
    pub car_make: String,
    pub car_model: String,
    pub car_registration: String,
    pub car_license_plate_number: String,
    pub driver_name: String,
    pub driver_license_number: String,
    pub accident_location: String,
    pub injuries_extent: String,
    pub vehicle_damage_extent: String,
    pub accident_description: String,
    pub investigating_officer: String,
    pub car_manufacture_year: u32,
    pub number_of_passengers: u32,
    /// Timestamp as supplied by the driver
    pub accident_date: String,
    /// Zero until coverage is established
    pub coverage_amount: Decimal,
    pub status: ClaimStatus,
}

impl ClaimRecord {
    /// Parses `accident_date` as RFC 3339, if it is in that format
    pub fn accident_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.accident_date)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Verifies that `operation` may move this claim to `target`
    pub fn check_transition(&self, operation: Operation, target: ClaimStatus) -> Result<(), ClaimError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(ClaimError::InvalidTransition {
                operation,
                current: self.status,
            })
        }
    }

    /// Filed -> Rejected
    pub fn reject(&mut self) -> Result<(), ClaimError> {
        self.transition(Operation::RejectClaim, ClaimStatus::Rejected)
    }

    /// Filed -> CoverageEstablished, recording the payout amount
    pub fn establish_coverage(&mut self, amount: Decimal) -> Result<(), ClaimError> {
        self.transition(Operation::EstablishCoverage, ClaimStatus::CoverageEstablished)?;
        self.coverage_amount = amount;
        Ok(())
    }

    /// CoverageEstablished -> CoverageIsPaid
    pub fn close(&mut self) -> Result<(), ClaimError> {
        self.transition(Operation::CloseClaim, ClaimStatus::CoverageIsPaid)
    }

    fn transition(&mut self, operation: Operation, target: ClaimStatus) -> Result<(), ClaimError> {
        self.check_transition(operation, target)?;
        self.status = target;
        Ok(())
    }

    /// Encodes the record as a ledger document
    pub fn to_bytes(&self) -> Result<Vec<u8>, ClaimError> {
        serde_json::to_vec(self).map_err(|e| ClaimError::corrupt(&self.id, e.to_string()))
    }

    /// Decodes a ledger document stored under `id`
    pub fn from_bytes(id: &ClaimId, bytes: &[u8]) -> Result<Self, ClaimError> {
        serde_json::from_slice(bytes).map_err(|e| ClaimError::corrupt(id, e.to_string()))
    }
}
