//! In-memory implementation of the PayloadStore trait.
//!
//! Primarily for testing. Same semantics as SQLite, no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use accord_core::{Namespace, RecordId};

use crate::error::Result;
use crate::traits::PayloadStore;

/// In-memory payload store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryPayloadStore {
    blobs: RwLock<HashMap<(Namespace, u64), Bytes>>,
}

impl MemoryPayloadStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryPayloadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PayloadStore for MemoryPayloadStore {
    async fn put(&self, namespace: &Namespace, id: RecordId, blob: Bytes) -> Result<()> {
        let mut blobs = self.blobs.write().unwrap();
        blobs.insert((*namespace, id.value()), blob);
        Ok(())
    }

    async fn get(&self, namespace: &Namespace, id: RecordId) -> Result<Option<Bytes>> {
        let blobs = self.blobs.read().unwrap();
        Ok(blobs.get(&(*namespace, id.value())).cloned())
    }

    async fn contains(&self, namespace: &Namespace, id: RecordId) -> Result<bool> {
        let blobs = self.blobs.read().unwrap();
        Ok(blobs.contains_key(&(*namespace, id.value())))
    }

    async fn remove(&self, namespace: &Namespace, id: RecordId) -> Result<()> {
        let mut blobs = self.blobs.write().unwrap();
        blobs.remove(&(*namespace, id.value()));
        Ok(())
    }

    async fn count(&self, namespace: &Namespace) -> Result<u64> {
        let blobs = self.blobs.read().unwrap();
        Ok(blobs.keys().filter(|(ns, _)| ns == namespace).count() as u64)
    }
}
