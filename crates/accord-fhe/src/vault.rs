//! The FingerprintVault trait: the capability contract Accord consumes.
//!
//! The vault is treated as correct and side-channel-free. Accord never
//! looks inside a ciphertext; it stores the handle on-ledger and asks the
//! vault to decrypt for an authorized identity during reconciliation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use accord_core::{FingerprintHandle, PartyId};

use crate::error::Result;

/// Opaque proof artifact accompanying an encryption.
///
/// The ledger requires it before accepting a ciphertext handle into a
/// record; its contents are meaningful only to the vault that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessProof(pub Vec<u8>);

impl AccessProof {
    /// Get the raw proof bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// The homomorphic-encryption capability.
///
/// # Contract
///
/// - `encrypt` issues a fresh handle per call; handles never collide.
/// - `allow_access` is additive and irrevocable. The only legitimate
///   caller in this system is the record store's finalize side effect.
/// - `decrypt` succeeds exactly for identities previously allowed on the
///   handle, and fails with `AccessDenied` otherwise.
#[async_trait]
pub trait FingerprintVault: Send + Sync {
    /// Encrypt a fingerprint integer, yielding a ledger-storable handle
    /// and the proof the ledger requires to accept it.
    async fn encrypt(
        &self,
        value: u32,
        encryptor: &PartyId,
    ) -> Result<(FingerprintHandle, AccessProof)>;

    /// Verify that a proof artifact matches a handle issued by this vault.
    async fn verify_proof(&self, handle: &FingerprintHandle, proof: &AccessProof) -> Result<()>;

    /// Grant decryption access to an identity. Additive; never revoked.
    async fn allow_access(&self, handle: &FingerprintHandle, identity: &PartyId) -> Result<()>;

    /// Decrypt the integer behind a handle for an authorized identity.
    async fn decrypt(&self, handle: &FingerprintHandle, identity: &PartyId) -> Result<u32>;
}
