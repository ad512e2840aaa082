//! # Accord Ledger
//!
//! The ledger host boundary and the ledger-resident record store.
//!
//! The real ledger is an external system: an append-only key-value store
//! with atomic, totally ordered state transitions and public reads.
//! Accord consumes it through the [`RecordLedger`] trait. [`MemoryLedger`]
//! is the in-process reference host: it serializes transitions behind a
//! single write lock and keeps records as CBOR bytes in an opaque KV map,
//! exactly the shape a ledger contract would see.
//!
//! The state machine itself lives in [`RecordStore`]; guard conditions
//! are enforced there, and a failed guard leaves the stored bytes
//! untouched.

pub mod error;
pub mod events;
pub mod host;
pub mod record_store;

pub use error::{LedgerError, Result};
pub use events::Event;
pub use host::{MemoryLedger, RecordLedger};
pub use record_store::RecordStore;
