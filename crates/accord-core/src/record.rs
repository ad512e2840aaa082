//! The Record: one exchange and its approval state machine.
//!
//! A record advances through exactly three states and never moves
//! backwards:
//!
//! ```text
//! AwaitingCounterpartyApproval --approve(counterparty)--> AwaitingInitiatorFinalization
//! AwaitingInitiatorFinalization --finalize(initiator)---> Finalized
//! ```
//!
//! Every other (state, event) pair fails and leaves the record unchanged.
//! Records are CBOR-encoded for storage in the ledger's opaque key-value
//! space.

use serde::{Deserialize, Serialize};

use crate::error::{TransitionError, ValidationError};
use crate::types::{FingerprintHandle, PartyId, RecordId};

/// Lifecycle status of a record.
///
/// Only these three states are constructible; the ordering of the
/// variants is the only legal order of traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Created by the initiator; waiting for the counterparty.
    AwaitingCounterpartyApproval,

    /// Approved by the counterparty; waiting for the initiator.
    AwaitingInitiatorFinalization,

    /// Both parties agreed; decryption access has been granted.
    Finalized,
}

impl RecordStatus {
    /// Whether decryption access has been granted.
    pub fn is_finalized(&self) -> bool {
        matches!(self, RecordStatus::Finalized)
    }
}

/// One tracked exchange.
///
/// `title`, `fingerprint_ciphertext`, `initiator`, and `counterparty` are
/// immutable after creation. Timestamps are Unix milliseconds with 0
/// meaning unset; they never decrease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique, monotonically assigned identifier.
    pub id: RecordId,

    /// Free-text label, non-empty.
    pub title: String,

    /// Handle to the homomorphically encrypted fingerprint.
    pub fingerprint_ciphertext: FingerprintHandle,

    /// The party that created the record.
    pub initiator: PartyId,

    /// The party whose approval is required.
    pub counterparty: PartyId,

    /// Current lifecycle status.
    pub status: RecordStatus,

    /// When the record was created.
    pub created_at: i64,

    /// When the counterparty approved (0 = not yet).
    pub counterparty_approved_at: i64,

    /// When the initiator finalized (0 = not yet).
    pub initiator_finalized_at: i64,
}

impl Record {
    /// Create a new record in the initial state.
    ///
    /// Validation runs before anything is constructed: the title must be
    /// non-empty and the counterparty must be a real identity distinct
    /// from the initiator.
    pub fn create(
        id: RecordId,
        title: impl Into<String>,
        initiator: PartyId,
        counterparty: PartyId,
        fingerprint_ciphertext: FingerprintHandle,
        now: i64,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if counterparty == initiator {
            return Err(ValidationError::CounterpartyIsInitiator);
        }
        if counterparty == PartyId::ZERO {
            return Err(ValidationError::CounterpartyIsZero);
        }

        Ok(Self {
            id,
            title,
            fingerprint_ciphertext,
            initiator,
            counterparty,
            status: RecordStatus::AwaitingCounterpartyApproval,
            created_at: now,
            counterparty_approved_at: 0,
            initiator_finalized_at: 0,
        })
    }

    /// Counterparty approval: AwaitingCounterpartyApproval -> AwaitingInitiatorFinalization.
    pub fn approve(&mut self, caller: PartyId, now: i64) -> Result<(), TransitionError> {
        if self.status != RecordStatus::AwaitingCounterpartyApproval {
            return Err(TransitionError::InvalidTransition {
                status: self.status,
                event: "approve",
            });
        }
        if caller != self.counterparty {
            return Err(TransitionError::WrongCaller {
                caller,
                event: "approve",
            });
        }

        self.status = RecordStatus::AwaitingInitiatorFinalization;
        self.counterparty_approved_at = now.max(self.created_at);
        Ok(())
    }

    /// Initiator finalization: AwaitingInitiatorFinalization -> Finalized.
    ///
    /// The caller is responsible for performing the grant side effect
    /// (vault access for both parties) in the same atomic transition.
    pub fn finalize(&mut self, caller: PartyId, now: i64) -> Result<(), TransitionError> {
        if self.status != RecordStatus::AwaitingInitiatorFinalization {
            return Err(TransitionError::InvalidTransition {
                status: self.status,
                event: "finalize",
            });
        }
        if caller != self.initiator {
            return Err(TransitionError::WrongCaller {
                caller,
                event: "finalize",
            });
        }

        self.status = RecordStatus::Finalized;
        self.initiator_finalized_at = now.max(self.counterparty_approved_at);
        Ok(())
    }

    /// Whether the given identity is one of the two parties.
    pub fn is_party(&self, identity: &PartyId) -> bool {
        *identity == self.initiator || *identity == self.counterparty
    }

    /// Serialize to CBOR bytes for ledger storage.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ciborium::de::Error<std::io::Error>> {
        ciborium::from_reader(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties() -> (PartyId, PartyId, PartyId) {
        (
            PartyId::from_bytes([1; 32]),
            PartyId::from_bytes([2; 32]),
            PartyId::from_bytes([3; 32]),
        )
    }

    fn handle() -> FingerprintHandle {
        FingerprintHandle::from_bytes([0xfe; 32])
    }

    fn make_record() -> Record {
        let (initiator, counterparty, _) = parties();
        Record::create(RecordId(0), "NDA", initiator, counterparty, handle(), 1000).unwrap()
    }

    #[test]
    fn test_create_initial_state() {
        let record = make_record();
        assert_eq!(record.status, RecordStatus::AwaitingCounterpartyApproval);
        assert_eq!(record.created_at, 1000);
        assert_eq!(record.counterparty_approved_at, 0);
        assert_eq!(record.initiator_finalized_at, 0);
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let (initiator, counterparty, _) = parties();
        let result = Record::create(RecordId(0), "", initiator, counterparty, handle(), 1000);
        assert_eq!(result.unwrap_err(), ValidationError::EmptyTitle);
    }

    #[test]
    fn test_create_rejects_self_counterparty() {
        let (initiator, _, _) = parties();
        let result = Record::create(RecordId(0), "NDA", initiator, initiator, handle(), 1000);
        assert_eq!(result.unwrap_err(), ValidationError::CounterpartyIsInitiator);
    }

    #[test]
    fn test_create_rejects_zero_counterparty() {
        let (initiator, _, _) = parties();
        let result = Record::create(RecordId(0), "NDA", initiator, PartyId::ZERO, handle(), 1000);
        assert_eq!(result.unwrap_err(), ValidationError::CounterpartyIsZero);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut record = make_record();
        let (initiator, counterparty, _) = parties();

        record.approve(counterparty, 2000).unwrap();
        assert_eq!(record.status, RecordStatus::AwaitingInitiatorFinalization);
        assert_eq!(record.counterparty_approved_at, 2000);

        record.finalize(initiator, 3000).unwrap();
        assert_eq!(record.status, RecordStatus::Finalized);
        assert_eq!(record.initiator_finalized_at, 3000);
    }

    #[test]
    fn test_approve_wrong_caller() {
        let mut record = make_record();
        let (initiator, _, outsider) = parties();

        for caller in [initiator, outsider] {
            let before = record.clone();
            let err = record.approve(caller, 2000).unwrap_err();
            assert!(matches!(err, TransitionError::WrongCaller { .. }));
            assert_eq!(record, before, "failed approve must not mutate");
        }
    }

    #[test]
    fn test_finalize_wrong_caller() {
        let mut record = make_record();
        let (_, counterparty, outsider) = parties();
        record.approve(counterparty, 2000).unwrap();

        for caller in [counterparty, outsider] {
            let before = record.clone();
            let err = record.finalize(caller, 3000).unwrap_err();
            assert!(matches!(err, TransitionError::WrongCaller { .. }));
            assert_eq!(record, before, "failed finalize must not mutate");
        }
    }

    #[test]
    fn test_no_skipping_states() {
        let mut record = make_record();
        let (initiator, _, _) = parties();

        // Finalize straight from the initial state must fail.
        let before = record.clone();
        let err = record.finalize(initiator, 2000).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
        assert_eq!(record, before);
    }

    #[test]
    fn test_no_reversing_states() {
        let mut record = make_record();
        let (initiator, counterparty, _) = parties();
        record.approve(counterparty, 2000).unwrap();
        record.finalize(initiator, 3000).unwrap();

        let before = record.clone();
        assert!(record.approve(counterparty, 4000).is_err());
        assert!(record.finalize(initiator, 4000).is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn test_double_approve_fails() {
        let mut record = make_record();
        let (_, counterparty, _) = parties();
        record.approve(counterparty, 2000).unwrap();

        let err = record.approve(counterparty, 2500).unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                status: RecordStatus::AwaitingInitiatorFinalization,
                event: "approve",
            }
        );
    }

    #[test]
    fn test_timestamps_never_decrease() {
        let mut record = make_record();
        let (initiator, counterparty, _) = parties();

        // A host clock that lags behind the creation time gets clamped.
        record.approve(counterparty, 500).unwrap();
        assert_eq!(record.counterparty_approved_at, 1000);

        record.finalize(initiator, 700).unwrap();
        assert_eq!(record.initiator_finalized_at, 1000);
    }

    #[test]
    fn test_is_party() {
        let record = make_record();
        let (initiator, counterparty, outsider) = parties();
        assert!(record.is_party(&initiator));
        assert!(record.is_party(&counterparty));
        assert!(!record.is_party(&outsider));
    }

    #[test]
    fn test_cbor_roundtrip() {
        let mut record = make_record();
        let (_, counterparty, _) = parties();
        record.approve(counterparty, 2000).unwrap();

        let bytes = record.to_bytes();
        let recovered = Record::from_bytes(&bytes).unwrap();
        assert_eq!(record, recovered);
    }
}
