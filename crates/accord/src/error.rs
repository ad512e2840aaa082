//! Error types for the Escrow client.
//!
//! Every failure a caller can observe maps to exactly one variant here.
//! `PayloadMissing` is the only transient class: the reconciliation
//! pipeline retries it with backoff before surfacing it. Everything else
//! is terminal for the attempt.

use thiserror::Error;

use accord_core::{PartyId, RecordId, TransitionError, ValidationError};
use accord_fhe::FheError;
use accord_ledger::LedgerError;
use accord_store::StoreError;

/// Errors that can occur during Escrow operations.
#[derive(Debug, Error)]
pub enum EscrowError {
    /// Bad input, rejected before any state change.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Event not legal in the record's current state, or wrong caller.
    #[error("transition error: {0}")]
    Transition(#[from] TransitionError),

    /// No record exists with this id.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Record exists but is not yet finalized.
    #[error("record {0} is not finalized")]
    NotReady(RecordId),

    /// Caller is neither initiator nor counterparty.
    #[error("caller {caller} is not a party to record {id}")]
    Unauthorized { id: RecordId, caller: PartyId },

    /// The vault refused to decrypt the fingerprint for this identity.
    #[error("fingerprint decryption denied: {0}")]
    DecryptionDenied(FheError),

    /// No sealed payload for the record after all retries.
    #[error("payload missing for record {0}")]
    PayloadMissing(RecordId),

    /// The sealed payload failed authentication or is malformed.
    #[error("payload corrupted for record {0}")]
    PayloadCorrupted(RecordId),

    /// The recovered document does not match the fingerprint recorded at
    /// creation. The plaintext is withheld.
    #[error("integrity mismatch for record {id}: expected fingerprint {expected}, got {actual}")]
    IntegrityMismatch {
        id: RecordId,
        expected: u32,
        actual: u32,
    },

    /// An external call exceeded the configured deadline.
    #[error("timed out waiting for {what}")]
    Timeout { what: &'static str },

    /// Payload store failure.
    #[error("payload store error: {0}")]
    Store(#[from] StoreError),

    /// Vault failure other than an access denial.
    #[error("vault error: {0}")]
    Vault(FheError),

    /// Internal invariant failure (stored bytes failed to decode).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<LedgerError> for EscrowError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Validation(v) => Self::Validation(v),
            LedgerError::Transition(t) => Self::Transition(t),
            LedgerError::NotFound(id) => Self::NotFound(id),
            LedgerError::NotReady(id) => Self::NotReady(id),
            LedgerError::Unauthorized { id, caller } => Self::Unauthorized { id, caller },
            LedgerError::Fhe(f) => f.into(),
            LedgerError::Codec(s) => Self::Internal(s),
        }
    }
}

impl From<FheError> for EscrowError {
    fn from(e: FheError) -> Self {
        match e {
            FheError::AccessDenied { .. } => Self::DecryptionDenied(e),
            other => Self::Vault(other),
        }
    }
}

/// Result type for Escrow operations.
pub type Result<T> = std::result::Result<T, EscrowError>;
