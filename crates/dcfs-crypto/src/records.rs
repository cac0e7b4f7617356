//! # Record Validation
//!
//! Validity rules for the records clients submit.
//!
//! - An identity is valid iff its self-signature verifies against its own
//!   embedded public key.
//! - A content block is valid iff its `updated_by` identity is valid and
//!   the block signature verifies against that identity's public key.
//!
//! An embedded key that cannot be parsed is a `CryptoError::KeyFormat`,
//! not a `false`.

use crate::codec::{sign_in_place, verify, Signable};
use crate::keys::{PrivateSigningKey, PublicVerifyingKey};
use crate::CryptoError;
use dcfs_types::{ContentBlock, Identity, LedgerBlock};

macro_rules! impl_signable {
    ($($record:ty),* $(,)?) => {
        $(
            impl Signable for $record {
                fn signature(&self) -> &[u8] {
                    &self.signature
                }

                fn signature_mut(&mut self) -> &mut Vec<u8> {
                    &mut self.signature
                }
            }
        )*
    };
}

impl_signable!(Identity, ContentBlock, LedgerBlock);

/// Check an identity's self-signature.
pub fn validate_identity(identity: &Identity) -> Result<bool, CryptoError> {
    let key = PublicVerifyingKey::from_pem(&identity.public_key)?;
    Ok(verify(identity, &key, &identity.signature))
}

/// Check a content block: valid submitter identity, then the block
/// signature under the submitter's key.
pub fn validate_content_block(block: &ContentBlock) -> Result<bool, CryptoError> {
    if !validate_identity(&block.updated_by)? {
        return Ok(false);
    }
    let key = PublicVerifyingKey::from_pem(&block.updated_by.public_key)?;
    Ok(verify(block, &key, &block.signature))
}

/// Build a self-signed identity for the holder of `key`.
pub fn issue_identity(uid: impl Into<Vec<u8>>, key: &PrivateSigningKey) -> Result<Identity, CryptoError> {
    let pem = key.public_key().to_pem()?;
    let mut identity = Identity::unsigned(uid, pem.into_bytes());
    sign_in_place(&mut identity, key)?;
    Ok(identity)
}
