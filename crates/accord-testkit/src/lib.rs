//! # Accord Testkit
//!
//! Testing utilities for Accord.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: pinned outputs for the fingerprint function and
//!   the PBKDF2 key derivation
//! - **Generators**: proptest strategies for identities, titles,
//!   documents, and attempted-transition sequences
//! - **Fixtures**: a full in-memory deployment (ledger, vault, payload
//!   store, three identities) for integration tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use accord_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok) in verify_all_vectors() {
//!     assert!(ok, "{} diverged", name);
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use accord_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let id = fixture.finalized_exchange("NDA", "terms").await;
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use generators::{event_sequence, exchange_event, Actor, ExchangeEvent};
pub use vectors::{
    fingerprint_vectors, kdf_vectors, verify_all_vectors, FingerprintVector, KdfVector,
};
