//! Document fingerprinting.
//!
//! A fingerprint is a small deterministic integer summary of document
//! text, committed on-ledger in homomorphically encrypted form and later
//! compared against a recomputation over the recovered payload.
//!
//! This is tamper evidence, not a cryptographic commitment: the output
//! space is 31 bits, so collisions are findable by anyone who wants them.
//! A party that needs binding guarantees must substitute a wide digest
//! truncated into the vault's plaintext domain.

/// Upper bound (exclusive) of the fingerprint range: 2^31 - 1.
///
/// Keeps the value inside the vault's unsigned 32-bit plaintext domain
/// with one bit of headroom.
pub const FINGERPRINT_MODULUS: u32 = 2_147_483_647;

/// Compute the fingerprint of a document.
///
/// Polynomial rolling hash over Unicode code points, accumulated in u32
/// with wrapping arithmetic, then reduced via the two's-complement
/// absolute value modulo [`FINGERPRINT_MODULUS`]. Deterministic across
/// calls, processes, and platforms.
pub fn fingerprint(text: &str) -> u32 {
    let mut hash: u32 = 0;
    for cp in text.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(cp as u32);
    }
    (hash as i32).unsigned_abs() % FINGERPRINT_MODULUS
}
