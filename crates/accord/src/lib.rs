//! # Accord
//!
//! Mutually approved exchange of sensitive documents, with the record of
//! agreement on a public append-only ledger.
//!
//! ## Overview
//!
//! An exchange goes through a strict three-step lifecycle:
//!
//! - **Create**: the initiator fingerprints the document, stores the
//!   fingerprint homomorphically encrypted on the ledger, and seals the
//!   document itself into an off-ledger payload store.
//! - **Approve**: the named counterparty signals agreement.
//! - **Finalize**: the initiator confirms, and only then are both parties
//!   granted the ability to decrypt the fingerprint.
//!
//! After finalization, either party can **reconcile**: fetch the sealed
//! payload, open it, and verify the recovered document against the
//! on-ledger fingerprint before any plaintext is released.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use accord::{Escrow, EscrowConfig, Keypair};
//! use accord::fhe::MockVault;
//! use accord::ledger::MemoryLedger;
//! use accord::store::MemoryPayloadStore;
//!
//! async fn example() {
//!     let alice = Keypair::generate();
//!     let bob = Keypair::generate();
//!
//!     let vault = Arc::new(MockVault::new());
//!     let ledger = Arc::new(MemoryLedger::deploy(&alice.party_id(), "deals", vault.clone()));
//!     let payloads = Arc::new(MemoryPayloadStore::new());
//!
//!     let escrow = Escrow::new(
//!         alice.party_id(),
//!         ledger,
//!         payloads,
//!         vault,
//!         EscrowConfig::default(),
//!     );
//!
//!     let id = escrow
//!         .create_exchange("NDA", "Confidential terms", bob.party_id())
//!         .await
//!         .unwrap();
//!
//!     // ... bob approves, alice finalizes, then either party reconciles:
//!     // let document = escrow.reconcile(id).await.unwrap();
//!     let _ = id;
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `accord::core` - Primitives (fingerprint, cipher, Record, identities)
//! - `accord::fhe` - Fingerprint vault boundary and mock implementation
//! - `accord::ledger` - Ledger host boundary and memory reference host
//! - `accord::store` - Off-ledger payload storage (memory and SQLite)

pub mod error;
pub mod escrow;

// Re-export component crates
pub use accord_core as core;
pub use accord_fhe as fhe;
pub use accord_ledger as ledger;
pub use accord_store as store;

// Re-export main types for convenience
pub use error::{EscrowError, Result};
pub use escrow::{Escrow, EscrowConfig, RetryConfig};

// Re-export commonly used core types
pub use accord_core::{
    fingerprint, Keypair, Namespace, PartyId, Record, RecordId, RecordStatus, StoreAddress,
};
