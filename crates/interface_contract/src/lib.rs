//! Claims Contract Interface
//!
//! Host-facing surface of the claims lifecycle:
//! - Transaction entry points taking string arguments
//! - Configuration loading from environment or files
//! - Tracing initialisation
//! - Error codes for responses

pub mod config;
pub mod contract;
pub mod error;
pub mod telemetry;

pub use config::{ContractConfig, LogFormat};
pub use contract::{InsuranceContract, TransactionContext};
pub use error::{ContractError, ErrorResponse};
pub use telemetry::init_tracing;
