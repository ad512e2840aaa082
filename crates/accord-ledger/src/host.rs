//! Ledger host boundary.
//!
//! [`RecordLedger`] is the surface clients consume: every method maps to
//! a transaction or a public read on the host ledger. [`MemoryLedger`] is
//! the reference host for tests and local runs: one write lock gives each
//! transition atomicity and a total order, which is exactly the guarantee
//! the external ledger provides per record.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use accord_core::{FingerprintHandle, PartyId, Record, RecordId, StoreAddress};
use accord_fhe::{AccessProof, FingerprintVault};

use crate::error::Result;
use crate::events::Event;
use crate::record_store::RecordStore;

/// The ledger host contract.
///
/// Transitions (`create`, `approve`, `finalize`) are atomic: a failed
/// guard reverts with no state change. Reads are public and side-effect
/// free.
#[async_trait]
pub trait RecordLedger: Send + Sync {
    /// The record store's public address.
    fn address(&self) -> StoreAddress;

    /// Create a record; the caller becomes the initiator.
    async fn create(
        &self,
        caller: PartyId,
        title: &str,
        counterparty: PartyId,
        fingerprint_ciphertext: FingerprintHandle,
        proof: &AccessProof,
    ) -> Result<RecordId>;

    /// Counterparty approval.
    async fn approve(&self, id: RecordId, caller: PartyId) -> Result<()>;

    /// Initiator finalization. Side effect: grants fingerprint decryption
    /// to both parties. No other operation grants access.
    async fn finalize(&self, id: RecordId, caller: PartyId) -> Result<()>;

    /// Read a record by id. `None` means never created.
    async fn record(&self, id: RecordId) -> Result<Option<Record>>;

    /// Read the encrypted fingerprint handle (finalized records, parties
    /// only).
    async fn encrypted_fingerprint(
        &self,
        id: RecordId,
        caller: PartyId,
    ) -> Result<FingerprintHandle>;

    /// Ids of records the identity participates in.
    async fn records_for(&self, party: PartyId) -> Result<Vec<RecordId>>;

    /// Total number of records created.
    async fn record_count(&self) -> Result<u64>;
}

/// In-process ledger host.
pub struct MemoryLedger {
    vault: Arc<dyn FingerprintVault>,
    state: RwLock<LedgerState>,
    address: StoreAddress,
    events_tx: broadcast::Sender<Event>,
}

struct LedgerState {
    store: RecordStore,
    log: Vec<Event>,
}

impl MemoryLedger {
    /// Create a ledger host at an explicit address.
    pub fn new(address: StoreAddress, vault: Arc<dyn FingerprintVault>) -> Self {
        let (events_tx, _) = broadcast::channel(64);
        Self {
            vault,
            state: RwLock::new(LedgerState {
                store: RecordStore::new(address),
                log: Vec::new(),
            }),
            address,
            events_tx,
        }
    }

    /// Deploy a fresh record store, deriving its address from the
    /// deployer identity and a deployment name.
    pub fn deploy(deployer: &PartyId, name: &str, vault: Arc<dyn FingerprintVault>) -> Self {
        Self::new(StoreAddress::derive(deployer, name), vault)
    }

    /// All events emitted so far, in transition order.
    pub async fn events(&self) -> Vec<Event> {
        self.state.read().await.log.clone()
    }

    /// Subscribe to events as they are emitted. Best-effort: a lagging
    /// subscriber may miss events; the log is authoritative.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events_tx.subscribe()
    }

    fn emit(&self, state: &mut LedgerState, event: Event) {
        state.log.push(event.clone());
        let _ = self.events_tx.send(event);
    }
}

#[async_trait]
impl RecordLedger for MemoryLedger {
    fn address(&self) -> StoreAddress {
        self.address
    }

    async fn create(
        &self,
        caller: PartyId,
        title: &str,
        counterparty: PartyId,
        fingerprint_ciphertext: FingerprintHandle,
        proof: &AccessProof,
    ) -> Result<RecordId> {
        // The ledger refuses ciphertexts the vault did not issue.
        self.vault
            .verify_proof(&fingerprint_ciphertext, proof)
            .await?;

        let mut state = self.state.write().await;
        let (id, event) =
            state
                .store
                .create(caller, title, counterparty, fingerprint_ciphertext, now_millis())?;
        self.emit(&mut state, event);
        Ok(id)
    }

    async fn approve(&self, id: RecordId, caller: PartyId) -> Result<()> {
        let mut state = self.state.write().await;
        let event = state.store.approve(id, caller, now_millis())?;
        self.emit(&mut state, event);
        Ok(())
    }

    async fn finalize(&self, id: RecordId, caller: PartyId) -> Result<()> {
        let mut state = self.state.write().await;
        let (event, record) = state.store.finalize(id, caller, now_millis())?;

        // Grant side effect, inside the same serialized transition. This
        // is the only call site of allow_access in the system. The grants
        // precede the commit: a vault refusal leaves the record awaiting
        // finalization, never Finalized without access.
        for party in [&record.initiator, &record.counterparty] {
            self.vault
                .allow_access(&record.fingerprint_ciphertext, party)
                .await?;
        }
        tracing::debug!(record = %id, "granted fingerprint access to both parties");

        state.store.commit(&record);
        self.emit(&mut state, event);
        Ok(())
    }

    async fn record(&self, id: RecordId) -> Result<Option<Record>> {
        self.state.read().await.store.record(id)
    }

    async fn encrypted_fingerprint(
        &self,
        id: RecordId,
        caller: PartyId,
    ) -> Result<FingerprintHandle> {
        self.state.read().await.store.encrypted_fingerprint(id, caller)
    }

    async fn records_for(&self, party: PartyId) -> Result<Vec<RecordId>> {
        self.state.read().await.store.records_for(party)
    }

    async fn record_count(&self) -> Result<u64> {
        Ok(self.state.read().await.store.count())
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use accord_core::RecordStatus;
    use accord_fhe::{FheError, MockVault};

    struct Deployment {
        ledger: MemoryLedger,
        vault: Arc<MockVault>,
        initiator: PartyId,
        counterparty: PartyId,
    }

    fn deploy() -> Deployment {
        let vault = Arc::new(MockVault::new());
        let deployer = PartyId::from_bytes([0xdd; 32]);
        let ledger = MemoryLedger::deploy(&deployer, "test", vault.clone());
        Deployment {
            ledger,
            vault,
            initiator: PartyId::from_bytes([1; 32]),
            counterparty: PartyId::from_bytes([2; 32]),
        }
    }

    async fn encrypt(d: &Deployment, value: u32) -> (FingerprintHandle, AccessProof) {
        d.vault.encrypt(value, &d.initiator).await.unwrap()
    }

    #[tokio::test]
    async fn test_full_flow_grants_on_finalize_only() {
        let d = deploy();
        let (handle, proof) = encrypt(&d, 77131).await;

        let id = d
            .ledger
            .create(d.initiator, "NDA", d.counterparty, handle, &proof)
            .await
            .unwrap();

        // No grants before finalization.
        assert!(d.vault.grantees(&handle).is_empty());

        d.ledger.approve(id, d.counterparty).await.unwrap();
        assert!(d.vault.grantees(&handle).is_empty());

        d.ledger.finalize(id, d.initiator).await.unwrap();
        let mut grantees = d.vault.grantees(&handle);
        grantees.sort_by_key(|p| *p.as_bytes());
        assert_eq!(grantees, vec![d.initiator, d.counterparty]);

        // Both parties can now decrypt through the vault.
        assert_eq!(d.vault.decrypt(&handle, &d.initiator).await.unwrap(), 77131);
        assert_eq!(
            d.vault.decrypt(&handle, &d.counterparty).await.unwrap(),
            77131
        );
    }

    #[tokio::test]
    async fn test_create_rejects_unproven_ciphertext() {
        let d = deploy();
        let (_, proof) = encrypt(&d, 1).await;
        let forged = FingerprintHandle::from_bytes([0xbb; 32]);

        let err = d
            .ledger
            .create(d.initiator, "NDA", d.counterparty, forged, &proof)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Fhe(_)));
        assert_eq!(d.ledger.record_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_events_in_transition_order() {
        let d = deploy();
        let (handle, proof) = encrypt(&d, 5).await;

        let id = d
            .ledger
            .create(d.initiator, "NDA", d.counterparty, handle, &proof)
            .await
            .unwrap();
        d.ledger.approve(id, d.counterparty).await.unwrap();
        d.ledger.finalize(id, d.initiator).await.unwrap();

        let events = d.ledger.events().await;
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::RecordCreated { .. }));
        assert!(matches!(events[1], Event::CounterpartyApproved { .. }));
        assert!(matches!(events[2], Event::InitiatorFinalized { .. }));
        assert!(events.iter().all(|e| e.record_id() == id));
    }

    #[tokio::test]
    async fn test_subscribe_receives_events() {
        let d = deploy();
        let mut rx = d.ledger.subscribe();
        let (handle, proof) = encrypt(&d, 5).await;

        let id = d
            .ledger
            .create(d.initiator, "NDA", d.counterparty, handle, &proof)
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.record_id(), id);
    }

    #[tokio::test]
    async fn test_failed_transition_reverts() {
        let d = deploy();
        let (handle, proof) = encrypt(&d, 5).await;
        let id = d
            .ledger
            .create(d.initiator, "NDA", d.counterparty, handle, &proof)
            .await
            .unwrap();

        // Initiator cannot approve.
        assert!(d.ledger.approve(id, d.initiator).await.is_err());
        let record = d.ledger.record(id).await.unwrap().unwrap();
        assert_eq!(record.counterparty_approved_at, 0);
        assert_eq!(d.ledger.events().await.len(), 1);
    }

    /// Vault that issues ciphertexts normally but refuses every grant.
    struct RefusingVault {
        inner: MockVault,
    }

    #[async_trait]
    impl FingerprintVault for RefusingVault {
        async fn encrypt(
            &self,
            value: u32,
            encryptor: &PartyId,
        ) -> accord_fhe::Result<(FingerprintHandle, AccessProof)> {
            self.inner.encrypt(value, encryptor).await
        }

        async fn verify_proof(
            &self,
            handle: &FingerprintHandle,
            proof: &AccessProof,
        ) -> accord_fhe::Result<()> {
            self.inner.verify_proof(handle, proof).await
        }

        async fn allow_access(
            &self,
            handle: &FingerprintHandle,
            _identity: &PartyId,
        ) -> accord_fhe::Result<()> {
            Err(FheError::UnknownHandle(*handle))
        }

        async fn decrypt(
            &self,
            handle: &FingerprintHandle,
            identity: &PartyId,
        ) -> accord_fhe::Result<u32> {
            self.inner.decrypt(handle, identity).await
        }
    }

    #[tokio::test]
    async fn test_vault_refusal_leaves_record_unfinalized() {
        let vault = Arc::new(RefusingVault {
            inner: MockVault::new(),
        });
        let deployer = PartyId::from_bytes([0xdd; 32]);
        let ledger = MemoryLedger::deploy(&deployer, "test", vault.clone());
        let (a, b) = (PartyId::from_bytes([1; 32]), PartyId::from_bytes([2; 32]));

        let (handle, proof) = vault.encrypt(42, &a).await.unwrap();
        let id = ledger.create(a, "NDA", b, handle, &proof).await.unwrap();
        ledger.approve(id, b).await.unwrap();

        let err = ledger.finalize(id, a).await.unwrap_err();
        assert!(matches!(err, LedgerError::Fhe(_)));

        // The transition reverted: still awaiting finalization, no
        // finalize event, fingerprint handle still gated.
        let record = ledger.record(id).await.unwrap().unwrap();
        assert_eq!(record.status, RecordStatus::AwaitingInitiatorFinalization);
        assert_eq!(record.initiator_finalized_at, 0);
        assert!(matches!(
            ledger.encrypted_fingerprint(id, a).await,
            Err(LedgerError::NotReady(_))
        ));
        assert_eq!(ledger.events().await.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_reads_while_transitioning() {
        let d = deploy();
        let (handle, proof) = encrypt(&d, 5).await;
        let id = d
            .ledger
            .create(d.initiator, "NDA", d.counterparty, handle, &proof)
            .await
            .unwrap();

        // Reads are idempotent and may interleave with transitions.
        let (r1, r2, _) = tokio::join!(
            d.ledger.record(id),
            d.ledger.record(id),
            d.ledger.approve(id, d.counterparty),
        );
        assert!(r1.unwrap().is_some());
        assert!(r2.unwrap().is_some());
    }
}
