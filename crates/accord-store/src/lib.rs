//! # Accord Store
//!
//! Off-ledger storage for sealed payload blobs.
//!
//! Only the encrypted fingerprint lives on the ledger; the sealed
//! document bytes go through the [`PayloadStore`] trait instead. The
//! primary implementation is [`SqlitePayloadStore`], with
//! [`MemoryPayloadStore`] for testing.
//!
//! Blobs are keyed by `(namespace, record_id)`, where the namespace is
//! derived from the record store address. The store treats blob contents
//! as opaque bytes; sealing and opening happen in `accord-core`.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryPayloadStore;
pub use sqlite::SqlitePayloadStore;
pub use traits::PayloadStore;
