//! Party identities.
//!
//! Parties are identified by Ed25519 public keys, the same scheme the
//! ledger host uses to authenticate transaction senders. This crate only
//! needs key generation and derivation; signing happens inside the ledger
//! host and is out of scope here.

use ed25519_dalek::SigningKey;
use std::fmt;

use crate::types::PartyId;

/// A keypair backing one party identity.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The party identity this keypair controls.
    pub fn party_id(&self) -> PartyId {
        PartyId(self.signing_key.verifying_key().to_bytes())
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.party_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.party_id(), kp2.party_id());
    }

    #[test]
    fn test_generated_identities_distinct() {
        let kp1 = Keypair::generate();
        let kp2 = Keypair::generate();
        assert_ne!(kp1.party_id(), kp2.party_id());
    }

    #[test]
    fn test_identity_never_zero() {
        let kp = Keypair::from_seed(&[0u8; 32]);
        assert_ne!(kp.party_id(), PartyId::ZERO);
    }
}
