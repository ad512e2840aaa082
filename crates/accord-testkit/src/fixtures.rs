//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a full in-memory deployment
//! with three identities (two parties and an outsider).

use std::sync::Arc;

use accord::{Escrow, EscrowConfig};
use accord_core::{Keypair, Namespace, PartyId, RecordId, StoreAddress};
use accord_fhe::MockVault;
use accord_ledger::{MemoryLedger, RecordLedger};
use accord_store::MemoryPayloadStore;

/// A complete in-memory deployment for tests.
pub struct TestFixture {
    pub initiator: Keypair,
    pub counterparty: Keypair,
    pub outsider: Keypair,
    pub vault: Arc<MockVault>,
    pub ledger: Arc<MemoryLedger>,
    pub payloads: Arc<MemoryPayloadStore>,
}

impl TestFixture {
    /// Create a fixture with random identities.
    pub fn new() -> Self {
        Self::with_name("test-exchanges")
    }

    /// Create a fixture with a specific deployment name.
    pub fn with_name(name: &str) -> Self {
        let initiator = Keypair::generate();
        let vault = Arc::new(MockVault::new());
        let ledger = Arc::new(MemoryLedger::deploy(
            &initiator.party_id(),
            name,
            vault.clone(),
        ));
        Self {
            initiator,
            counterparty: Keypair::generate(),
            outsider: Keypair::generate(),
            vault,
            ledger,
            payloads: Arc::new(MemoryPayloadStore::new()),
        }
    }

    /// Create a fixture with deterministic identities from seeds.
    pub fn with_seeds(initiator: [u8; 32], counterparty: [u8; 32], outsider: [u8; 32]) -> Self {
        let initiator = Keypair::from_seed(&initiator);
        let vault = Arc::new(MockVault::new());
        let ledger = Arc::new(MemoryLedger::deploy(
            &initiator.party_id(),
            "test-exchanges",
            vault.clone(),
        ));
        Self {
            initiator,
            counterparty: Keypair::from_seed(&counterparty),
            outsider: Keypair::from_seed(&outsider),
            vault,
            ledger,
            payloads: Arc::new(MemoryPayloadStore::new()),
        }
    }

    /// The deployed record store address.
    pub fn address(&self) -> StoreAddress {
        self.ledger.address()
    }

    /// The payload namespace for this deployment.
    pub fn namespace(&self) -> Namespace {
        Namespace::derive(&self.ledger.address())
    }

    /// An escrow client acting as the given party.
    pub fn escrow_for(
        &self,
        party: PartyId,
    ) -> Escrow<MemoryLedger, MemoryPayloadStore, MockVault> {
        Escrow::new(
            party,
            self.ledger.clone(),
            self.payloads.clone(),
            self.vault.clone(),
            EscrowConfig::default(),
        )
    }

    /// Drive an exchange through create, approve, and finalize.
    pub async fn finalized_exchange(&self, title: &str, document: &str) -> RecordId {
        let initiator = self.escrow_for(self.initiator.party_id());
        let counterparty = self.escrow_for(self.counterparty.party_id());

        let id = initiator
            .create_exchange(title, document, self.counterparty.party_id())
            .await
            .expect("create");
        counterparty.approve(id).await.expect("approve");
        initiator.finalize(id).await.expect("finalize");
        id
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
