//! The ledger-resident record store.
//!
//! Single-writer state machine over an opaque key-value space: records
//! live as CBOR bytes keyed by id, and the id counter is part of the
//! store's own persistent state. The host is responsible for serializing
//! calls; the store assumes each transition runs alone.
//!
//! Every transition is guard-then-write: the stored bytes for a record
//! change only after all guards pass, so a failed call leaves the state
//! byte-for-byte unchanged.

use std::collections::BTreeMap;

use accord_core::{FingerprintHandle, PartyId, Record, RecordId, StoreAddress};

use crate::error::{LedgerError, Result};
use crate::events::Event;

/// Record store state: id counter plus the record KV space.
pub struct RecordStore {
    address: StoreAddress,
    next_id: u64,
    records: BTreeMap<u64, Vec<u8>>,
}

impl RecordStore {
    /// Create an empty store at the given address.
    pub fn new(address: StoreAddress) -> Self {
        Self {
            address,
            next_id: 0,
            records: BTreeMap::new(),
        }
    }

    /// The store's public ledger address.
    pub fn address(&self) -> StoreAddress {
        self.address
    }

    /// Number of records ever created. Ids range over 0..count.
    pub fn count(&self) -> u64 {
        self.next_id
    }

    fn load(&self, id: RecordId) -> Result<Record> {
        let bytes = self
            .records
            .get(&id.value())
            .ok_or(LedgerError::NotFound(id))?;
        Record::from_bytes(bytes).map_err(|e| LedgerError::Codec(e.to_string()))
    }

    fn store(&mut self, record: &Record) {
        self.records.insert(record.id.value(), record.to_bytes());
    }

    /// Create a new record, assigning the next id.
    ///
    /// The caller becomes the initiator. The id counter advances only
    /// when validation succeeds.
    pub fn create(
        &mut self,
        caller: PartyId,
        title: &str,
        counterparty: PartyId,
        fingerprint_ciphertext: FingerprintHandle,
        now: i64,
    ) -> Result<(RecordId, Event)> {
        let id = RecordId(self.next_id);
        let record = Record::create(id, title, caller, counterparty, fingerprint_ciphertext, now)?;

        self.next_id += 1;
        self.store(&record);

        let event = Event::RecordCreated {
            id,
            initiator: caller,
            counterparty,
            title: title.to_string(),
            time: now,
        };
        Ok((id, event))
    }

    /// Counterparty approval transition.
    pub fn approve(&mut self, id: RecordId, caller: PartyId, now: i64) -> Result<Event> {
        let mut record = self.load(id)?;
        record.approve(caller, now)?;

        let time = record.counterparty_approved_at;
        self.store(&record);
        Ok(Event::CounterpartyApproved { id, time })
    }

    /// Initiator finalization transition.
    ///
    /// Validates and returns the finalized record without storing it.
    /// The host performs the access grants first and calls [`commit`]
    /// only once they succeed, so a record is never Finalized on-ledger
    /// without both parties holding a grant. This is the only path that
    /// authorizes a grant.
    ///
    /// [`commit`]: RecordStore::commit
    pub fn finalize(&self, id: RecordId, caller: PartyId, now: i64) -> Result<(Event, Record)> {
        let mut record = self.load(id)?;
        record.finalize(caller, now)?;

        let time = record.initiator_finalized_at;
        Ok((Event::InitiatorFinalized { id, time }, record))
    }

    /// Commit a record returned by [`finalize`](RecordStore::finalize).
    pub fn commit(&mut self, record: &Record) {
        self.store(record);
    }

    /// Read a record. Public: anyone may read any field.
    pub fn record(&self, id: RecordId) -> Result<Option<Record>> {
        match self.records.get(&id.value()) {
            None => Ok(None),
            Some(bytes) => Record::from_bytes(bytes)
                .map(Some)
                .map_err(|e| LedgerError::Codec(e.to_string())),
        }
    }

    /// Read the encrypted fingerprint handle, gated on finalization and
    /// party membership.
    pub fn encrypted_fingerprint(
        &self,
        id: RecordId,
        caller: PartyId,
    ) -> Result<FingerprintHandle> {
        let record = self.load(id)?;
        if !record.status.is_finalized() {
            return Err(LedgerError::NotReady(id));
        }
        if !record.is_party(&caller) {
            return Err(LedgerError::Unauthorized { id, caller });
        }
        Ok(record.fingerprint_ciphertext)
    }

    /// Ids of all records where the identity is a party, ascending.
    pub fn records_for(&self, party: PartyId) -> Result<Vec<RecordId>> {
        let mut ids = Vec::new();
        for bytes in self.records.values() {
            let record =
                Record::from_bytes(bytes).map_err(|e| LedgerError::Codec(e.to_string()))?;
            if record.is_party(&party) {
                ids.push(record.id);
            }
        }
        Ok(ids)
    }
}
