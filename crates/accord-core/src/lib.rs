//! # Accord Core
//!
//! Pure primitives for the Accord exchange system: identities, record
//! state, fingerprinting, and the payload cipher.
//!
//! This crate contains no I/O, no ledger access, no storage. It is pure
//! computation over the data that the ledger and payload store crates
//! move around.
//!
//! ## Key Types
//!
//! - [`Record`] - One tracked exchange with its approval state
//! - [`RecordId`] - Monotonically assigned record identifier
//! - [`PartyId`] - A ledger identity (Ed25519 public key bytes)
//! - [`StoreAddress`] - The public identifier of a deployed record store
//!
//! ## Crypto
//!
//! - [`fingerprint`] - Deterministic integer summary of document text
//! - [`cipher`] - Passphrase-based authenticated encryption of payloads

pub mod cipher;
pub mod error;
pub mod fingerprint;
pub mod identity;
pub mod record;
pub mod types;

pub use cipher::{open, seal, SealedBlob};
pub use error::{CipherError, TransitionError, ValidationError};
pub use fingerprint::{fingerprint, FINGERPRINT_MODULUS};
pub use identity::Keypair;
pub use record::{Record, RecordStatus};
pub use types::{FingerprintHandle, Namespace, PartyId, RecordId, StoreAddress};
