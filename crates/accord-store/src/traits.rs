//! PayloadStore trait: the abstract interface for sealed-blob persistence.
//!
//! Payload blobs never touch the ledger. This trait lets the exchange
//! layer stay storage-agnostic; implementations include SQLite (primary)
//! and in-memory (for tests).

use async_trait::async_trait;
use bytes::Bytes;

use accord_core::{Namespace, RecordId};

use crate::error::Result;

/// Async interface for sealed payload persistence.
///
/// Blobs are opaque to the store. Keys are `(namespace, record_id)`:
/// the namespace is derived from the record store address, so distinct
/// deployments sharing a backend never collide.
///
/// `put` is an upsert. Re-sealing a payload for the same record replaces
/// the previous blob; there is at most one blob per key.
#[async_trait]
pub trait PayloadStore: Send + Sync {
    /// Store a sealed blob under the given key, replacing any existing
    /// blob for that key.
    async fn put(&self, namespace: &Namespace, id: RecordId, blob: Bytes) -> Result<()>;

    /// Fetch the sealed blob for a key. `None` means no blob was ever
    /// stored, or it has since been removed.
    async fn get(&self, namespace: &Namespace, id: RecordId) -> Result<Option<Bytes>>;

    /// Check whether a blob exists for a key.
    async fn contains(&self, namespace: &Namespace, id: RecordId) -> Result<bool>;

    /// Remove the blob for a key. Removing an absent key is not an
    /// error.
    async fn remove(&self, namespace: &Namespace, id: RecordId) -> Result<()>;

    /// Number of blobs stored under a namespace.
    async fn count(&self, namespace: &Namespace) -> Result<u64>;
}
