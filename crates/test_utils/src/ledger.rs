//! Fault-injecting ledger
//!
//! Wraps an [`InMemoryLedger`] and fails reads or writes on demand, for
//! exercising store failure propagation.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{InMemoryLedger, LedgerStore};

/// Which ledger calls fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `get` times out
    ReadTimeout,
    /// `put` and `create` report the ledger as unavailable
    WriteUnavailable,
    /// `put` and `create` report a conflicting concurrent write
    WriteConflict,
}

/// Ledger that injects failures in front of an in-memory store
#[derive(Debug, Clone, Default)]
pub struct FlakyLedger {
    inner: InMemoryLedger,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    write_conflict: Arc<AtomicBool>,
    rejected_writes: Arc<AtomicUsize>,
}

impl FlakyLedger {
    pub fn new(inner: InMemoryLedger) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Underlying store, for seeding and inspecting documents
    pub fn inner(&self) -> &InMemoryLedger {
        &self.inner
    }

    pub fn inject(&self, fault: Fault) {
        match fault {
            Fault::ReadTimeout => self.fail_reads.store(true, Ordering::SeqCst),
            Fault::WriteUnavailable => self.fail_writes.store(true, Ordering::SeqCst),
            Fault::WriteConflict => self.write_conflict.store(true, Ordering::SeqCst),
        }
    }

    /// Clears every injected fault
    pub fn heal(&self) {
        self.fail_reads.store(false, Ordering::SeqCst);
        self.fail_writes.store(false, Ordering::SeqCst);
        self.write_conflict.store(false, Ordering::SeqCst);
    }

    /// Number of writes refused by an injected fault
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> Result<(), PortError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            self.rejected_writes.fetch_add(1, Ordering::SeqCst);
            return Err(PortError::ServiceUnavailable {
                service: "ledger".to_string(),
            });
        }
        if self.write_conflict.load(Ordering::SeqCst) {
            self.rejected_writes.fetch_add(1, Ordering::SeqCst);
            return Err(PortError::conflict("concurrent write to the same key"));
        }
        Ok(())
    }
}

impl DomainPort for FlakyLedger {}

#[async_trait]
impl LedgerStore for FlakyLedger {
    async fn get(&self, id: &ClaimId) -> Result<Option<Vec<u8>>, PortError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PortError::Timeout {
                operation: format!("get {id}"),
                duration_ms: 3000,
            });
        }
        self.inner.get(id).await
    }

    async fn put(&self, id: &ClaimId, bytes: Vec<u8>) -> Result<(), PortError> {
        self.check_write()?;
        self.inner.put(id, bytes).await
    }

    async fn create(&self, id: &ClaimId, bytes: Vec<u8>) -> Result<(), PortError> {
        self.check_write()?;
        self.inner.create(id, bytes).await
    }
}
