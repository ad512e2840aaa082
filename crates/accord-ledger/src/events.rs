//! Ledger events.
//!
//! Emitted once per successful transition, in transition order. They are
//! informational; the KV state is authoritative.

use serde::{Deserialize, Serialize};

use accord_core::{PartyId, RecordId};

/// An event emitted by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A record entered the lifecycle.
    RecordCreated {
        id: RecordId,
        initiator: PartyId,
        counterparty: PartyId,
        title: String,
        time: i64,
    },

    /// The counterparty approved.
    CounterpartyApproved { id: RecordId, time: i64 },

    /// The initiator finalized; decryption access is now granted.
    InitiatorFinalized { id: RecordId, time: i64 },
}

impl Event {
    /// The record this event concerns.
    pub fn record_id(&self) -> RecordId {
        match self {
            Event::RecordCreated { id, .. } => *id,
            Event::CounterpartyApproved { id, .. } => *id,
            Event::InitiatorFinalized { id, .. } => *id,
        }
    }

    /// The event timestamp.
    pub fn time(&self) -> i64 {
        match self {
            Event::RecordCreated { time, .. } => *time,
            Event::CounterpartyApproved { time, .. } => *time,
            Event::InitiatorFinalized { time, .. } => *time,
        }
    }
}
