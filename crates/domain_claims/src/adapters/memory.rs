//! In-memory ledger

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ClaimId, DomainPort, PortError};

use crate::claim::ClaimRecord;
use crate::error::ClaimError;
use crate::ports::LedgerStore;

/// `LedgerStore` backed by a map behind a tokio `RwLock`
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    documents: Arc<RwLock<HashMap<ClaimId, Vec<u8>>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the ledger with claim records
    pub async fn with_records(records: impl IntoIterator<Item = ClaimRecord>) -> Result<Self, ClaimError> {
        let ledger = Self::new();
        for record in records {
            ledger.seed(&record).await?;
        }
        Ok(ledger)
    }

    /// Stores a record without going through the lifecycle and without
    /// counting as a write
    pub async fn seed(&self, record: &ClaimRecord) -> Result<(), ClaimError> {
        let bytes = record.to_bytes()?;
        self.documents.write().await.insert(record.id.clone(), bytes);
        Ok(())
    }

    /// Stores raw bytes under `id`, for corrupt-document scenarios
    pub async fn seed_raw(&self, id: &ClaimId, bytes: impl Into<Vec<u8>>) {
        self.documents.write().await.insert(id.clone(), bytes.into());
    }

    /// Raw document stored under `id`
    pub async fn raw(&self, id: &ClaimId) -> Option<Vec<u8>> {
        self.documents.read().await.get(id).cloned()
    }

    /// Decoded record stored under `id`
    pub async fn record(&self, id: &ClaimId) -> Option<ClaimRecord> {
        let bytes = self.raw(id).await?;
        ClaimRecord::from_bytes(id, &bytes).ok()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Number of successful `put`/`create` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl DomainPort for InMemoryLedger {}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn get(&self, id: &ClaimId) -> Result<Option<Vec<u8>>, PortError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn put(&self, id: &ClaimId, bytes: Vec<u8>) -> Result<(), PortError> {
        self.documents.write().await.insert(id.clone(), bytes);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    // Check and insert under one write guard.
    async fn create(&self, id: &ClaimId, bytes: Vec<u8>) -> Result<(), PortError> {
        let mut documents = self.documents.write().await;
        if documents.get(id).is_some_and(|existing| !existing.is_empty()) {
            return Err(PortError::conflict(format!("key {id} already exists")));
        }
        documents.insert(id.clone(), bytes);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
