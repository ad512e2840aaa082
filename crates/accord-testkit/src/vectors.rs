//! Golden test vectors for deterministic verification.
//!
//! These pin the fingerprint function and the PBKDF2 key derivation to
//! known outputs, so any reimplementation (or dependency bump) that
//! changes the math fails loudly.

use accord_core::cipher::{derive_key, SALT_LEN};
use accord_core::fingerprint;

/// A fingerprint golden vector.
#[derive(Debug, Clone)]
pub struct FingerprintVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Input document text.
    pub text: &'static str,
    /// Expected fingerprint value.
    pub expected: u32,
}

/// Get all fingerprint golden vectors.
pub fn fingerprint_vectors() -> Vec<FingerprintVector> {
    vec![
        FingerprintVector {
            name: "empty string",
            text: "",
            expected: 0,
        },
        FingerprintVector {
            name: "single letter",
            text: "a",
            expected: 97,
        },
        FingerprintVector {
            name: "two letters",
            text: "ab",
            expected: 3105,
        },
        FingerprintVector {
            name: "three letters",
            text: "abc",
            expected: 96354,
        },
        FingerprintVector {
            name: "short title",
            text: "NDA",
            expected: 77131,
        },
        FingerprintVector {
            name: "typical phrase",
            text: "Confidential terms",
            expected: 1_684_638_991,
        },
        FingerprintVector {
            name: "pangram",
            text: "The quick brown fox jumps over the lazy dog",
            expected: 609_428_141,
        },
        FingerprintVector {
            name: "non-ascii code points",
            text: "h\u{e9}llo w\u{f6}rld \u{20ac}",
            expected: 1_283_057_445,
        },
        FingerprintVector {
            name: "single astral code point",
            text: "\u{1F600}",
            expected: 0x1F600,
        },
        FingerprintVector {
            name: "overflow exercised (56 chars)",
            text: "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
            expected: 1_555_402_512,
        },
    ]
}

/// The 1000-character repetition vector, built at runtime.
pub fn long_repetition_vector() -> (String, u32) {
    ("x".repeat(1000), 1_715_418_112)
}

/// A PBKDF2-HMAC-SHA256 key derivation vector (100_000 iterations).
#[derive(Debug, Clone)]
pub struct KdfVector {
    pub name: &'static str,
    pub passphrase: &'static str,
    pub salt: [u8; SALT_LEN],
    /// Expected 32-byte key, hex-encoded.
    pub expected_key_hex: &'static str,
}

/// Get all key derivation golden vectors.
pub fn kdf_vectors() -> Vec<KdfVector> {
    vec![
        KdfVector {
            name: "word passphrase, zero salt",
            passphrase: "passphrase",
            salt: [0u8; SALT_LEN],
            expected_key_hex: "ca41e2a44399759ee274005687a64223904aa9a837e97aaab6119558d9d5152a",
        },
        KdfVector {
            name: "64-hex-char passphrase, counting salt",
            passphrase: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
            salt: [
                0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
                0x0d, 0x0e, 0x0f,
            ],
            expected_key_hex: "823a76559ead1ba13ed6b1aeb5808ddc0d2d0cee59a34f4334ea2259a646f78a",
        },
    ]
}

/// Verify every vector, returning (name, passed) pairs.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    let mut results: Vec<(String, bool)> = fingerprint_vectors()
        .iter()
        .map(|v| (v.name.to_string(), fingerprint(v.text) == v.expected))
        .collect();

    let (long_text, long_expected) = long_repetition_vector();
    results.push((
        "1000-char repetition".to_string(),
        fingerprint(&long_text) == long_expected,
    ));

    for v in kdf_vectors() {
        let key = derive_key(v.passphrase, &v.salt);
        results.push((v.name.to_string(), hex::encode(key) == v.expected_key_hex));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_vectors() {
        for v in fingerprint_vectors() {
            assert_eq!(
                fingerprint(v.text),
                v.expected,
                "vector '{}' mismatch",
                v.name
            );
        }
    }

    #[test]
    fn test_long_repetition_vector() {
        let (text, expected) = long_repetition_vector();
        assert_eq!(fingerprint(&text), expected);
    }

    #[test]
    fn test_kdf_vectors() {
        for v in kdf_vectors() {
            let key = derive_key(v.passphrase, &v.salt);
            assert_eq!(hex::encode(key), v.expected_key_hex, "vector '{}' mismatch", v.name);
        }
    }

    #[test]
    fn test_verify_all_vectors_passes() {
        for (name, ok) in verify_all_vectors() {
            assert!(ok, "vector '{}' failed", name);
        }
    }
}
