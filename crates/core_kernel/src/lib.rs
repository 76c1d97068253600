//! Core Kernel - Foundational types for the claims ledger
//!
//! This crate provides the building blocks shared by the domain and contract crates:
//! - Ledger key identifiers
//! - The kernel error type
//! - Port infrastructure for the ports-and-adapters layout

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::ClaimId;
pub use error::CoreError;
pub use ports::{PortError, DomainPort, OperationMetadata};
