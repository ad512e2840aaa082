//! Error types for Accord core operations.

use thiserror::Error;

use crate::record::RecordStatus;
use crate::types::PartyId;

/// Input validation errors, rejected before any state mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("counterparty must differ from initiator")]
    CounterpartyIsInitiator,

    #[error("counterparty must not be the zero identity")]
    CounterpartyIsZero,
}

/// State machine transition errors.
///
/// A failed transition leaves the record unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("{event} is not legal while record status is {status:?}")]
    InvalidTransition {
        status: RecordStatus,
        event: &'static str,
    },

    #[error("caller {caller} may not {event} this record")]
    WrongCaller {
        caller: PartyId,
        event: &'static str,
    },
}

/// Payload cipher errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// Tag verification failed: tampered blob or wrong passphrase.
    #[error("authentication failed")]
    Authentication,

    /// Blob shorter than the fixed salt/nonce/tag framing.
    #[error("sealed blob truncated: {0} bytes")]
    Truncated(usize),

    /// AEAD encryption failure (should not occur with valid inputs).
    #[error("encryption error: {0}")]
    Encryption(String),
}
