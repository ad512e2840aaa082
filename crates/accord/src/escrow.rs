//! The Escrow client: one party's view of a document exchange.
//!
//! An `Escrow` binds a party identity to the three collaborators (record
//! ledger, fingerprint vault, payload store) and orchestrates the
//! lifecycle: create an exchange, approve it, finalize it, and reconcile
//! the sealed payload back into plaintext once both parties have signed
//! off.
//!
//! Mutations go through the ledger and are atomic there. Reconciliation
//! is read-only and idempotent: it can be re-run at any point and either
//! yields the verified document or a precise failure.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use accord_core::{fingerprint, open, seal, Namespace, PartyId, Record, RecordId, StoreAddress};
use accord_fhe::FingerprintVault;
use accord_ledger::RecordLedger;
use accord_store::PayloadStore;

use crate::error::{EscrowError, Result};

/// Retry policy for transient payload-store misses.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total fetch attempts before giving up.
    pub max_attempts: u32,
    /// Backoff before the second attempt.
    pub initial_backoff: Duration,
    /// Backoff ceiling; doubling stops here.
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_secs(1),
        }
    }
}

/// Configuration for the Escrow client.
#[derive(Debug, Clone)]
pub struct EscrowConfig {
    /// Retry policy for payload fetches.
    pub retry: RetryConfig,
    /// Deadline applied to each external call.
    pub call_timeout: Duration,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            call_timeout: Duration::from_secs(5),
        }
    }
}

/// One party's client for a deployed record store.
///
/// Cheap to construct per party; the collaborators are shared via Arc.
pub struct Escrow<L: RecordLedger, P: PayloadStore, V: FingerprintVault> {
    party: PartyId,
    ledger: Arc<L>,
    payloads: Arc<P>,
    vault: Arc<V>,
    config: EscrowConfig,
    namespace: Namespace,
    passphrase: String,
}

impl<L: RecordLedger, P: PayloadStore, V: FingerprintVault> Escrow<L, P, V> {
    /// Create a client acting as the given party.
    pub fn new(
        party: PartyId,
        ledger: Arc<L>,
        payloads: Arc<P>,
        vault: Arc<V>,
        config: EscrowConfig,
    ) -> Self {
        let address = ledger.address();
        // The store address hex is the payload passphrase. The address is
        // public, so the symmetric layer keeps honest readers out and
        // provides tamper evidence; it is not secrecy against anyone who
        // can see the ledger.
        let passphrase = address.to_hex();
        let namespace = Namespace::derive(&address);
        Self {
            party,
            ledger,
            payloads,
            vault,
            config,
            namespace,
            passphrase,
        }
    }

    /// The party this client acts as.
    pub fn party(&self) -> PartyId {
        self.party
    }

    /// The record store this client talks to.
    pub fn address(&self) -> StoreAddress {
        self.ledger.address()
    }

    /// Start an exchange: fingerprint the document, encrypt the
    /// fingerprint in the vault, create the record, and seal the payload
    /// off-ledger.
    ///
    /// The sealed blob is written before this returns, so the
    /// counterparty can reconcile as soon as the exchange finalizes.
    pub async fn create_exchange(
        &self,
        title: &str,
        document: &str,
        counterparty: PartyId,
    ) -> Result<RecordId> {
        let value = fingerprint(document);
        let (handle, proof) = self
            .timed("vault encrypt", self.vault.encrypt(value, &self.party))
            .await??;

        let id = self
            .timed(
                "ledger create",
                self.ledger
                    .create(self.party, title, counterparty, handle, &proof),
            )
            .await??;

        let blob = seal(document.as_bytes(), &self.passphrase)
            .map_err(|e| EscrowError::Internal(e.to_string()))?;
        self.timed(
            "payload put",
            self.payloads.put(&self.namespace, id, Bytes::from(blob)),
        )
        .await??;

        tracing::debug!(record = %id, "exchange created, payload sealed");
        Ok(id)
    }

    /// Approve an exchange as its counterparty.
    pub async fn approve(&self, id: RecordId) -> Result<()> {
        self.timed("ledger approve", self.ledger.approve(id, self.party))
            .await??;
        Ok(())
    }

    /// Finalize an exchange as its initiator. After this both parties can
    /// decrypt the fingerprint and reconcile the payload.
    pub async fn finalize(&self, id: RecordId) -> Result<()> {
        self.timed("ledger finalize", self.ledger.finalize(id, self.party))
            .await??;
        Ok(())
    }

    /// Read a record. Ledger state is public.
    pub async fn record(&self, id: RecordId) -> Result<Option<Record>> {
        Ok(self
            .timed("ledger read", self.ledger.record(id))
            .await??)
    }

    /// Ids of exchanges this party participates in.
    pub async fn exchanges(&self) -> Result<Vec<RecordId>> {
        Ok(self
            .timed("ledger read", self.ledger.records_for(self.party))
            .await??)
    }

    /// Recover and verify the document for a finalized exchange.
    ///
    /// The pipeline runs in a fixed order so every failure is
    /// attributable: record existence, finalization, party membership,
    /// fingerprint decryption, payload fetch (with retry), payload
    /// authentication, and finally the fingerprint integrity check. The
    /// plaintext is returned only if the recomputed fingerprint matches
    /// the one sealed into the ledger at creation.
    pub async fn reconcile(&self, id: RecordId) -> Result<String> {
        let record = self
            .timed("ledger read", self.ledger.record(id))
            .await??
            .ok_or(EscrowError::NotFound(id))?;

        if !record.status.is_finalized() {
            return Err(EscrowError::NotReady(id));
        }
        if !record.is_party(&self.party) {
            return Err(EscrowError::Unauthorized {
                id,
                caller: self.party,
            });
        }

        let handle = self
            .timed(
                "ledger read",
                self.ledger.encrypted_fingerprint(id, self.party),
            )
            .await??;
        let expected = self
            .timed("vault decrypt", self.vault.decrypt(&handle, &self.party))
            .await??;

        let blob = self.fetch_payload(id).await?;

        let plaintext =
            open(&blob, &self.passphrase).map_err(|_| EscrowError::PayloadCorrupted(id))?;
        let document =
            String::from_utf8(plaintext).map_err(|_| EscrowError::PayloadCorrupted(id))?;

        let actual = fingerprint(&document);
        if actual != expected {
            // Withhold the plaintext: a mismatch means the off-ledger
            // blob does not correspond to what both parties approved.
            tracing::warn!(record = %id, expected, actual, "fingerprint integrity mismatch");
            return Err(EscrowError::IntegrityMismatch {
                id,
                expected,
                actual,
            });
        }

        Ok(document)
    }

    /// Fetch the sealed blob, retrying transient misses with bounded
    /// exponential backoff. The blob is written before create_exchange
    /// returns, so a miss here is expected to be replication lag.
    async fn fetch_payload(&self, id: RecordId) -> Result<Bytes> {
        let mut backoff = self.config.retry.initial_backoff;
        let attempts = self.config.retry.max_attempts.max(1);

        for attempt in 1..=attempts {
            let blob = self
                .timed("payload get", self.payloads.get(&self.namespace, id))
                .await??;
            if let Some(blob) = blob {
                return Ok(blob);
            }
            if attempt < attempts {
                tracing::debug!(
                    record = %id,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    "payload not yet visible, backing off"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(self.config.retry.max_backoff);
            }
        }

        Err(EscrowError::PayloadMissing(id))
    }

    async fn timed<T>(&self, what: &'static str, fut: impl Future<Output = T>) -> Result<T> {
        tokio::time::timeout(self.config.call_timeout, fut)
            .await
            .map_err(|_| EscrowError::Timeout { what })
    }
}
