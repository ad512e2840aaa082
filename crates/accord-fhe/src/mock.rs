//! In-process mock of the fingerprint vault.
//!
//! Reproduces the capability contract for tests and local deployments:
//! values are stored masked under random handles, grants are additive
//! sets, and decryption requires an explicit grant. This is a stand-in,
//! not homomorphic encryption.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use rand::RngCore;

use accord_core::{FingerprintHandle, PartyId};

use crate::error::{FheError, Result};
use crate::vault::{AccessProof, FingerprintVault};

/// In-memory vault implementation.
///
/// Thread-safe via RwLock. All data is lost when the vault is dropped.
pub struct MockVault {
    inner: RwLock<MockVaultInner>,
}

struct MockVaultInner {
    /// Ciphertexts indexed by handle.
    ciphertexts: HashMap<FingerprintHandle, MaskedValue>,

    /// Grant sets per handle. Entries are only ever added.
    grants: HashMap<FingerprintHandle, HashSet<PartyId>>,
}

/// A value masked with a random pad, standing in for a real ciphertext.
struct MaskedValue {
    masked: u32,
    pad: u32,
    proof: AccessProof,
}

impl MockVault {
    /// Create a new empty vault.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MockVaultInner {
                ciphertexts: HashMap::new(),
                grants: HashMap::new(),
            }),
        }
    }

    /// Number of ciphertexts issued (test observability).
    pub fn ciphertext_count(&self) -> usize {
        self.inner.read().unwrap().ciphertexts.len()
    }

    /// Identities currently granted on a handle (test observability).
    pub fn grantees(&self, handle: &FingerprintHandle) -> Vec<PartyId> {
        self.inner
            .read()
            .unwrap()
            .grants
            .get(handle)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for MockVault {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof binding: Blake3 over handle || encryptor || masked value.
fn compute_proof(handle: &FingerprintHandle, encryptor: &PartyId, masked: u32) -> AccessProof {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"accord-fhe-proof-v0:");
    hasher.update(handle.as_bytes());
    hasher.update(encryptor.as_bytes());
    hasher.update(&masked.to_le_bytes());
    AccessProof(hasher.finalize().as_bytes().to_vec())
}

#[async_trait]
impl FingerprintVault for MockVault {
    async fn encrypt(
        &self,
        value: u32,
        encryptor: &PartyId,
    ) -> Result<(FingerprintHandle, AccessProof)> {
        let mut rng = rand::thread_rng();

        let mut handle_bytes = [0u8; 32];
        rng.fill_bytes(&mut handle_bytes);
        let handle = FingerprintHandle::from_bytes(handle_bytes);

        let pad = rng.next_u32();
        let masked = value ^ pad;
        let proof = compute_proof(&handle, encryptor, masked);

        let mut inner = self.inner.write().unwrap();
        inner.ciphertexts.insert(
            handle,
            MaskedValue {
                masked,
                pad,
                proof: proof.clone(),
            },
        );
        inner.grants.entry(handle).or_default();

        Ok((handle, proof))
    }

    async fn verify_proof(&self, handle: &FingerprintHandle, proof: &AccessProof) -> Result<()> {
        let inner = self.inner.read().unwrap();
        let stored = inner
            .ciphertexts
            .get(handle)
            .ok_or(FheError::UnknownHandle(*handle))?;

        if stored.proof != *proof {
            return Err(FheError::InvalidProof(*handle));
        }
        Ok(())
    }

    async fn allow_access(&self, handle: &FingerprintHandle, identity: &PartyId) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if !inner.ciphertexts.contains_key(handle) {
            return Err(FheError::UnknownHandle(*handle));
        }
        inner.grants.entry(*handle).or_default().insert(*identity);
        Ok(())
    }

    async fn decrypt(&self, handle: &FingerprintHandle, identity: &PartyId) -> Result<u32> {
        let inner = self.inner.read().unwrap();
        let stored = inner
            .ciphertexts
            .get(handle)
            .ok_or(FheError::UnknownHandle(*handle))?;

        let granted = inner
            .grants
            .get(handle)
            .map(|set| set.contains(identity))
            .unwrap_or(false);
        if !granted {
            return Err(FheError::AccessDenied {
                identity: *identity,
                handle: *handle,
            });
        }

        Ok(stored.masked ^ stored.pad)
    }
}
