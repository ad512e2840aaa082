//! # Accord FHE
//!
//! The homomorphic-encryption capability boundary.
//!
//! The real primitive lives outside this system; Accord consumes it
//! through the [`FingerprintVault`] trait: encrypt a small integer under
//! the vault's key, hand back an opaque handle, and later decrypt it only
//! for identities that were explicitly allowed. Access is additive and
//! never revoked.
//!
//! [`MockVault`] is the in-process stand-in used by tests and local
//! deployments. It is not homomorphic encryption; it reproduces the
//! capability contract exactly and nothing more.

pub mod error;
pub mod mock;
pub mod vault;

pub use error::{FheError, Result};
pub use mock::MockVault;
pub use vault::{AccessProof, FingerprintVault};
