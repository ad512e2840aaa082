//! Payload cipher: passphrase-based authenticated encryption.
//!
//! Documents are sealed under a key derived from a passphrase with
//! PBKDF2-HMAC-SHA256 and encrypted with ChaCha20-Poly1305. The sealed
//! blob layout is fixed and must be reproduced byte-for-byte:
//!
//! ```text
//! salt[16] || nonce[12] || ciphertext_and_tag
//! ```
//!
//! In Accord the passphrase is the record store's public address, which
//! anyone can read off the ledger. The layer therefore provides tamper
//! evidence and obfuscation against casual observers, not confidentiality
//! against ledger readers. That layering is deliberate; see the design
//! notes before "fixing" it.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;

use crate::error::CipherError;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// AEAD nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Poly1305 tag length in bytes.
pub const TAG_LEN: usize = 16;

/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Derive a 256-bit AEAD key from a passphrase and salt.
pub fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(passphrase.as_bytes(), salt, KDF_ITERATIONS, &mut key);
    key
}

/// A parsed view of the fixed sealed-blob layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBlob {
    /// Per-seal random KDF salt.
    pub salt: [u8; SALT_LEN],

    /// Per-seal random AEAD nonce.
    pub nonce: [u8; NONCE_LEN],

    /// Ciphertext with the Poly1305 tag appended.
    pub ciphertext: Vec<u8>,
}

impl SealedBlob {
    /// Parse a blob from its wire layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        if bytes.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
            return Err(CipherError::Truncated(bytes.len()));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[..SALT_LEN]);

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[SALT_LEN..SALT_LEN + NONCE_LEN]);

        Ok(Self {
            salt,
            nonce,
            ciphertext: bytes[SALT_LEN + NONCE_LEN..].to_vec(),
        })
    }

    /// Encode to the wire layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SALT_LEN + NONCE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }
}

/// Seal a plaintext under a passphrase.
///
/// A fresh salt and nonce are drawn per call, so sealing the same
/// plaintext twice yields different blobs.
pub fn seal(plaintext: &[u8], passphrase: &str) -> Result<Vec<u8>, CipherError> {
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    let key = derive_key(passphrase, &salt);
    let aead = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| CipherError::Encryption(e.to_string()))?;

    let ciphertext = aead
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CipherError::Encryption(e.to_string()))?;

    Ok(SealedBlob {
        salt,
        nonce,
        ciphertext,
    }
    .to_bytes())
}

/// Open a sealed blob under a passphrase.
///
/// Fails with [`CipherError::Authentication`] if the tag does not verify
/// (tampered blob or wrong passphrase). Never returns partial plaintext.
pub fn open(blob: &[u8], passphrase: &str) -> Result<Vec<u8>, CipherError> {
    let parsed = SealedBlob::from_bytes(blob)?;

    let key = derive_key(passphrase, &parsed.salt);
    let aead = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|e| CipherError::Encryption(e.to_string()))?;

    aead.decrypt(Nonce::from_slice(&parsed.nonce), parsed.ciphertext.as_ref())
        .map_err(|_| CipherError::Authentication)
}
