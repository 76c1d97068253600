//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims, payloads, and callers
//! - `builders`: Builder for claim payloads with fake data
//! - `ledger`: Fault-injecting ledger for store failure scenarios
//! - `assertions`: Custom assertion helpers for claim errors and records
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod ledger;
pub mod assertions;
pub mod generators;

use once_cell::sync::Lazy;

pub use fixtures::*;
pub use builders::*;
pub use ledger::*;
pub use assertions::*;
pub use generators::*;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
});

/// Installs a test-friendly tracing subscriber once per process
///
/// Set `RUST_LOG=domain_claims=debug` to see lifecycle spans in test output.
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
