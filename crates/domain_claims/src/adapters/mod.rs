//! Ledger adapters
//!
//! Production hosts supply their own `LedgerStore`. The in-memory ledger backs
//! tests and local tooling.

pub mod memory;

pub use memory::InMemoryLedger;
