//! Strong type definitions for Accord.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ledger identity: the 32-byte public key of a party.
///
/// Identities are compared byte-for-byte. The all-zero identity is a
/// sentinel that no real party can hold; record creation rejects it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(pub [u8; 32]);

impl PartyId {
    /// Create a new PartyId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero identity (sentinel, never a real party).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartyId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for PartyId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PartyId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A record identifier, assigned monotonically by the record store.
///
/// Ids start at 0 and never repeat. Existence of a record is tracked
/// separately, so id 0 is distinguishable from "never created".
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Get the raw id value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// The public ledger identifier of a deployed record store.
///
/// Derived from the deployer identity and a deployment name, so the same
/// deployer can run independent stores. The hex encoding of this address
/// doubles as the payload-cipher passphrase; it is public by design, which
/// makes the symmetric layer tamper evidence rather than confidentiality
/// against ledger readers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreAddress(pub [u8; 32]);

impl StoreAddress {
    /// Derive a store address from deployer identity and deployment name.
    pub fn derive(deployer: &PartyId, name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"accord-store-v0:");
        hasher.update(&deployer.0);
        hasher.update(b":");
        hasher.update(name.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string. This is the payload-cipher passphrase.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for StoreAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreAddress({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for StoreAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// The off-ledger namespace under which payload blobs are keyed.
///
/// Derived from the store address so that two stores never collide in a
/// shared payload backend.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace(pub [u8; 32]);

impl Namespace {
    /// Derive the payload namespace for a record store.
    pub fn derive(address: &StoreAddress) -> Self {
        let mut hasher = blake3::Hasher::new_derive_key("accord-payload-namespace-v0");
        hasher.update(&address.0);
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({})", &self.to_hex()[..16])
    }
}

/// Opaque handle to a homomorphically encrypted fingerprint.
///
/// The handle itself reveals nothing about the plaintext integer; only
/// the vault that issued it can decrypt, and only for identities it has
/// been told to allow.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FingerprintHandle(pub [u8; 32]);

impl FingerprintHandle {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for FingerprintHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FingerprintHandle({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for FingerprintHandle {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for FingerprintHandle {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_id_hex_roundtrip() {
        let id = PartyId::from_bytes([0x42; 32]);
        let hex = id.to_hex();
        let recovered = PartyId::from_hex(&hex).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_party_id_zero_sentinel() {
        assert_eq!(PartyId::ZERO.as_bytes(), &[0u8; 32]);
        assert_ne!(PartyId::from_bytes([1; 32]), PartyId::ZERO);
    }

    #[test]
    fn test_store_address_derivation() {
        let deployer = PartyId::from_bytes([0xab; 32]);
        let a1 = StoreAddress::derive(&deployer, "main");
        let a2 = StoreAddress::derive(&deployer, "main");
        assert_eq!(a1, a2);

        let a3 = StoreAddress::derive(&deployer, "other");
        assert_ne!(a1, a3);

        let other = PartyId::from_bytes([0xcd; 32]);
        let a4 = StoreAddress::derive(&other, "main");
        assert_ne!(a1, a4);
    }

    #[test]
    fn test_namespace_follows_address() {
        let deployer = PartyId::from_bytes([0x01; 32]);
        let addr = StoreAddress::derive(&deployer, "main");
        let ns1 = Namespace::derive(&addr);
        let ns2 = Namespace::derive(&addr);
        assert_eq!(ns1, ns2);

        let other = StoreAddress::derive(&deployer, "staging");
        assert_ne!(ns1, Namespace::derive(&other));
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId(7);
        assert_eq!(format!("{}", id), "7");
        assert_eq!(format!("{:?}", id), "RecordId(7)");
    }
}
