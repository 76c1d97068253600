//! Claims Domain Ports
//!
//! The authoritative claim state lives in an external key-value ledger. The
//! domain only needs single-key reads and writes from it, expressed by the
//! `LedgerStore` port so hosts can plug in their own ledger client.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimLifecycleService, InMemoryLedger, LedgerStore};
//! use std::sync::Arc;
//!
//! let ledger: Arc<dyn LedgerStore> = Arc::new(InMemoryLedger::new());
//! let service = ClaimLifecycleService::new(ledger);
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError};

/// Key-value ledger holding one document per claim id
///
/// Read-then-write atomicity for a single key is the ledger's concern; the
/// domain never locks or retries.
#[async_trait]
pub trait LedgerStore: DomainPort {
    /// Reads the document stored under `id`
    ///
    /// Returns `Ok(None)` when the key has never been written. Adapters may
    /// report absence as `PortError::NotFound` instead.
    async fn get(&self, id: &ClaimId) -> Result<Option<Vec<u8>>, PortError>;

    /// Writes `bytes` under `id`, replacing any previous document
    async fn put(&self, id: &ClaimId, bytes: Vec<u8>) -> Result<(), PortError>;

    /// A key exists when it holds a non-empty document
    async fn exists(&self, id: &ClaimId) -> Result<bool, PortError> {
        match self.get(id).await {
            Ok(bytes) => Ok(bytes.is_some_and(|bytes| !bytes.is_empty())),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Writes a new document, refusing to overwrite an existing key
    ///
    /// The provided implementation checks then writes. Adapters with a native
    /// conditional write should override it.
    async fn create(&self, id: &ClaimId, bytes: Vec<u8>) -> Result<(), PortError> {
        if self.exists(id).await? {
            return Err(PortError::conflict(format!("key {id} already exists")));
        }
        self.put(id, bytes).await
    }
}
