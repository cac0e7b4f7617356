//! # Signature Codec
//!
//! Sign and verify any record that carries its own signature field.
//!
//! The signed message is the canonical encoding of the record with the
//! signature field cleared. The caller's record is never modified by
//! `sign` or `verify`: the clearing happens on a private copy, so repeated
//! calls on the same input always agree.

use crate::keys::{PrivateSigningKey, PublicVerifyingKey};
use crate::CryptoError;
use dcfs_types::{BlockHash, LedgerBlock};
use rsa::pkcs1v15::Signature;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// A record that carries a signature over its own canonical encoding.
pub trait Signable: Serialize + Clone {
    /// Current signature bytes.
    fn signature(&self) -> &[u8];

    /// Mutable access to the signature field.
    fn signature_mut(&mut self) -> &mut Vec<u8>;
}

/// Canonical encoding of `record` with its signature field cleared.
pub fn canonical_bytes<T: Signable>(record: &T) -> Result<Vec<u8>, CryptoError> {
    let mut unsigned = record.clone();
    unsigned.signature_mut().clear();
    bincode::serialize(&unsigned).map_err(|e| CryptoError::Encoding(e.to_string()))
}

/// Sign `record` with `key`.
///
/// SHA-256 digest of the canonical bytes, PKCS#1 v1.5 padding. The padding
/// is deterministic; the RNG only blinds the private-key operation.
pub fn sign<T: Signable>(record: &T, key: &PrivateSigningKey) -> Result<Vec<u8>, CryptoError> {
    let message = canonical_bytes(record)?;
    let signature = key
        .signing_key()
        .try_sign_with_rng(&mut rand::thread_rng(), &message)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    Ok(signature.to_vec())
}

/// Clear the signature field, sign, and store the new signature.
pub fn sign_in_place<T: Signable>(record: &mut T, key: &PrivateSigningKey) -> Result<(), CryptoError> {
    record.signature_mut().clear();
    let signature = sign(record, key)?;
    *record.signature_mut() = signature;
    Ok(())
}

/// Check `signature` over `record` against `key`.
///
/// Returns `false` for any mismatch, including a signature of the wrong
/// length.
pub fn verify<T: Signable>(record: &T, key: &PublicVerifyingKey, signature: &[u8]) -> bool {
    let Ok(message) = canonical_bytes(record) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };
    key.verifying_key().verify(&message, &signature).is_ok()
}

/// Content address of a ledger block: lowercase hex SHA-256 over its full
/// encoding, signature included.
pub fn block_hash(block: &LedgerBlock) -> Result<BlockHash, CryptoError> {
    let bytes = bincode::serialize(block).map_err(|e| CryptoError::Encoding(e.to_string()))?;
    Ok(BlockHash::new(hex::encode(Sha256::digest(&bytes))))
}
