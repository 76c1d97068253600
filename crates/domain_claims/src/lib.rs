//! Car Accident Claims Domain
//!
//! This crate implements the lifecycle of a car accident insurance claim
//! whose authoritative state lives in an external key-value ledger.
//!
//! # Claim Lifecycle
//!
//! ```text
//! (none) -- fileClaim --> Filed -- rejectClaim --> Rejected
//!                           |
//!                           +-- establishCoverage --> CoverageEstablished -- closeClaim --> CoverageIsPaid
//! ```
//!
//! Each operation is gated by the caller's role (`driver`, `claimsAdjuster`,
//! `insuranceCompanyManager`) before the ledger is touched.

pub mod adapters;
pub mod authorization;
pub mod claim;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod payload;
pub mod ports;
pub mod roles;

pub use adapters::InMemoryLedger;
pub use authorization::{check_role, resolve_role, AuthorizationGate};
pub use claim::{ClaimRecord, ClaimStatus};
pub use error::ClaimError;
pub use identity::{CallerIdentity, StaticIdentity, DEFAULT_ROLE_ATTRIBUTE};
pub use lifecycle::{ClaimLifecycleService, CoverageAmountPolicy};
pub use payload::{require_field, ClaimPayload, ClaimSubmission, REQUIRED_FIELDS};
pub use ports::LedgerStore;
pub use roles::{AccessPolicy, Operation, Role, UnknownRole};
