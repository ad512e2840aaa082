//! Proptest generators for property-based testing.

use proptest::prelude::*;

use accord_core::{FingerprintHandle, Keypair, PartyId, Record};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random party identity.
pub fn party_id() -> impl Strategy<Value = PartyId> {
    keypair().prop_map(|kp| kp.party_id())
}

/// Generate a random fingerprint handle.
pub fn fingerprint_handle() -> impl Strategy<Value = FingerprintHandle> {
    any::<[u8; 32]>().prop_map(FingerprintHandle::from_bytes)
}

/// Generate a non-empty record title.
pub fn title() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _-]{0,63}".prop_map(String::from)
}

/// Generate document text, including non-ASCII code points.
pub fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=512).prop_map(|cs| cs.into_iter().collect())
}

/// Generate a reasonable Unix-ms timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    1i64..=i64::MAX / 2
}

/// Who attempts a transition in a generated event sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Initiator,
    Counterparty,
    Outsider,
}

/// One attempted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeEvent {
    Approve(Actor),
    Finalize(Actor),
}

/// Generate an arbitrary attempted transition.
pub fn exchange_event() -> impl Strategy<Value = ExchangeEvent> {
    let actor = prop_oneof![
        Just(Actor::Initiator),
        Just(Actor::Counterparty),
        Just(Actor::Outsider),
    ];
    (actor, prop::bool::ANY).prop_map(|(who, approve)| {
        if approve {
            ExchangeEvent::Approve(who)
        } else {
            ExchangeEvent::Finalize(who)
        }
    })
}

/// Generate a sequence of attempted transitions.
pub fn event_sequence(max_len: usize) -> impl Strategy<Value = Vec<ExchangeEvent>> {
    prop::collection::vec(exchange_event(), 0..=max_len)
}

/// Apply an attempted transition to a record, ignoring rejections.
pub fn apply_event(
    record: &mut Record,
    event: ExchangeEvent,
    initiator: PartyId,
    counterparty: PartyId,
    outsider: PartyId,
    now: i64,
) {
    let caller = |actor: Actor| match actor {
        Actor::Initiator => initiator,
        Actor::Counterparty => counterparty,
        Actor::Outsider => outsider,
    };
    match event {
        ExchangeEvent::Approve(who) => {
            let _ = record.approve(caller(who), now);
        }
        ExchangeEvent::Finalize(who) => {
            let _ = record.finalize(caller(who), now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_core::{fingerprint, RecordId, RecordStatus};

    fn fresh_record(initiator: PartyId, counterparty: PartyId) -> Record {
        Record::create(
            RecordId(0),
            "NDA",
            initiator,
            counterparty,
            FingerprintHandle::from_bytes([7; 32]),
            1_000,
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn test_status_monotonic_under_arbitrary_events(
            events in event_sequence(24),
            seeds in (any::<[u8; 32]>(), any::<[u8; 32]>(), any::<[u8; 32]>()),
        ) {
            let initiator = Keypair::from_seed(&seeds.0).party_id();
            let counterparty = Keypair::from_seed(&seeds.1).party_id();
            let outsider = Keypair::from_seed(&seeds.2).party_id();
            prop_assume!(initiator != counterparty);

            let mut record = fresh_record(initiator, counterparty);
            let mut now = 2_000;

            for event in events {
                let before = record.status;
                apply_event(&mut record, event, initiator, counterparty, outsider, now);
                now += 1;

                // Status never regresses and never skips a step.
                prop_assert!(record.status >= before);
                if record.status > before {
                    prop_assert_eq!(record.status as u8, before as u8 + 1);
                }
                // Identities and the fingerprint handle are immutable.
                prop_assert_eq!(record.initiator, initiator);
                prop_assert_eq!(record.counterparty, counterparty);
            }
        }

        #[test]
        fn test_finalize_requires_prior_approval(events in event_sequence(24)) {
            let initiator = Keypair::from_seed(&[1; 32]).party_id();
            let counterparty = Keypair::from_seed(&[2; 32]).party_id();
            let outsider = Keypair::from_seed(&[3; 32]).party_id();

            let mut record = fresh_record(initiator, counterparty);
            for (i, event) in events.into_iter().enumerate() {
                apply_event(&mut record, event, initiator, counterparty, outsider, 2_000 + i as i64);
            }

            if record.status == RecordStatus::Finalized {
                prop_assert!(record.counterparty_approved_at > 0);
                prop_assert!(record.initiator_finalized_at >= record.counterparty_approved_at);
            }
        }

        #[test]
        fn test_fingerprint_deterministic(text in document()) {
            prop_assert_eq!(fingerprint(&text), fingerprint(&text));
            prop_assert!(fingerprint(&text) < accord_core::FINGERPRINT_MODULUS);
        }

        #[test]
        fn test_generated_titles_valid(t in title(), seeds in (any::<[u8; 32]>(), any::<[u8; 32]>())) {
            let a = Keypair::from_seed(&seeds.0).party_id();
            let b = Keypair::from_seed(&seeds.1).party_id();
            prop_assume!(a != b);
            prop_assert!(Record::create(
                RecordId(0), t, a, b, FingerprintHandle::from_bytes([0; 32]), 1,
            ).is_ok());
        }
    }
}
