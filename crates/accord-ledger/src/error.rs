//! Error types for the ledger crate.

use thiserror::Error;

use accord_core::{PartyId, RecordId, TransitionError, ValidationError};
use accord_fhe::FheError;

/// Errors from record store transitions and ledger reads.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Bad input shape, rejected before any mutation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Event not legal in the record's current state.
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

    /// Vault capability failure.
    #[error("vault error: {0}")]
    Fhe(#[from] FheError),

    /// Stored record bytes failed to decode.
    #[error("codec error: {0}")]
    Codec(String),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
