//! Claims domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{ClaimId, PortError};
use crate::claim::ClaimStatus;
use crate::roles::Operation;

/// Errors that can occur in the claims domain
///
/// Every variant is terminal for the operation that raised it. Authorization,
/// existence, status and field checks all run before the single ledger write,
/// so a failed operation never leaves a partial record behind.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Caller role absent or not in the operation's allow-list
    #[error("Current user cannot perform this operation.")]
    Unauthorized {
        operation: Operation,
        role: Option<String>,
    },

    #[error("The claim {0} already exists.")]
    AlreadyExists(ClaimId),

    #[error("The claim {0} does not exist.")]
    NotFound(ClaimId),

    #[error("The '{0}' field is required.")]
    MissingField(&'static str),

    #[error("Cannot {verb} a claim in status {current}", verb = .operation.verb())]
    InvalidTransition {
        operation: Operation,
        current: ClaimStatus,
    },

    #[error("Invalid coverage amount: {0}")]
    InvalidCoverageAmount(Decimal),

    #[error("Malformed claim payload: {0}")]
    MalformedPayload(String),

    #[error("Claim record {id} could not be decoded: {message}")]
    CorruptRecord { id: ClaimId, message: String },

    /// Ledger get/put failure, propagated unchanged
    #[error("Ledger failure: {0}")]
    Store(#[from] PortError),
}

impl ClaimError {
    pub fn unauthorized(operation: Operation, role: Option<String>) -> Self {
        ClaimError::Unauthorized { operation, role }
    }

    pub fn corrupt(id: &ClaimId, message: impl Into<String>) -> Self {
        ClaimError::CorruptRecord {
            id: id.clone(),
            message: message.into(),
        }
    }

    /// Returns the current status carried by an invalid transition
    pub fn current_status(&self) -> Option<ClaimStatus> {
        match self {
            ClaimError::InvalidTransition { current, .. } => Some(*current),
            _ => None,
        }
    }

    /// True when the underlying ledger failure is transient.
    ///
    /// Informational only; the lifecycle service never retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, ClaimError::Store(e) if e.is_transient())
    }
}
