//! # DCFS Crypto - Identity & Signature Codec
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `codec` | Canonical encoding, sign/verify of any `Signable` record, block hashing |
//! | `keys` | PEM loading of RSA public (SPKI) and signing (PKCS#8) keys |
//! | `records` | Validation and issuance of identities and content blocks |
//!
//! ## Scheme
//!
//! - Canonical bytes: `bincode` of the record with its signature cleared
//! - Digest: SHA-256
//! - Signature: RSA PKCS#1 v1.5 (deterministic padding, blinded with
//!   `rand::thread_rng`)
//!
//! Verification failure is a `false`, never an error. A key that cannot be
//! parsed is always an error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod errors;
pub mod keys;
pub mod records;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

// Re-exports
pub use codec::{block_hash, canonical_bytes, sign, sign_in_place, verify, Signable};
pub use errors::CryptoError;
pub use keys::{PrivateSigningKey, PublicVerifyingKey};
pub use records::{issue_identity, validate_content_block, validate_identity};
