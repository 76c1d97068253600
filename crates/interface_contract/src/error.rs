//! Contract error handling

use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_claims::ClaimError;

/// Contract error types
#[derive(Debug, Error)]
pub enum ContractError {
    #[error(transparent)]
    Claim(#[from] ClaimError),

    /// A string argument could not be converted
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },
}

/// Error body returned to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ContractError {
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        ContractError::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::InvalidArgument { .. } => "invalid_argument",
            ContractError::Claim(err) => match err {
                ClaimError::Unauthorized { .. } => "unauthorized",
                ClaimError::AlreadyExists(_) => "already_exists",
                ClaimError::NotFound(_) => "not_found",
                ClaimError::MissingField(_) => "missing_field",
                ClaimError::InvalidTransition { .. } => "invalid_transition",
                ClaimError::InvalidCoverageAmount(_) => "invalid_coverage_amount",
                ClaimError::MalformedPayload(_) => "malformed_payload",
                ClaimError::CorruptRecord { .. } => "corrupt_record",
                ClaimError::Store(_) => "store_failure",
            },
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        }
    }

    /// The underlying domain error, if any
    pub fn claim_error(&self) -> Option<&ClaimError> {
        match self {
            ContractError::Claim(err) => Some(err),
            ContractError::InvalidArgument { .. } => None,
        }
    }
}
