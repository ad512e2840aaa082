//! Error types for the fingerprint vault.

use thiserror::Error;

use accord_core::{FingerprintHandle, PartyId};

/// Errors from the fingerprint vault capability.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FheError {
    /// The requesting identity holds no grant for this handle.
    #[error("access denied: {identity} holds no grant for {handle:?}")]
    AccessDenied {
        identity: PartyId,
        handle: FingerprintHandle,
    },

    /// The handle was not issued by this vault.
    #[error("unknown ciphertext handle: {0:?}")]
    UnknownHandle(FingerprintHandle),

    /// The proof artifact does not match the ciphertext.
    #[error("invalid encryption proof for {0:?}")]
    InvalidProof(FingerprintHandle),
}

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, FheError>;
