//! # Chain ACL Resolver
//!
//! Decides whether a submitter may write, by consulting the write-allow-list
//! of a referenced inode block.
//!
//! An allow-list entry authorizes the submitter iff all three hold:
//! 1. same public key bytes
//! 2. same uid bytes
//! 3. the entry itself is a valid self-signed identity
//!
//! The first entry satisfying all three wins. Entries are only compared,
//! never trusted on their own: a tampered entry is skipped.

use crate::domain::entities::{StoreKind, StoreOperation};
use crate::domain::errors::MiddlewareError;
use crate::ports::outbound::{bounded_call, BlockStoreClient};
use dcfs_crypto::{validate_identity, CryptoError};
use dcfs_types::{BlockHash, Identity};
use std::time::Duration;
use tracing::debug;

/// First allow-list entry that authorizes `submitter`, if any.
///
/// An entry whose embedded key cannot be parsed is an error, not a skip.
pub fn find_authorizing_entry<'a>(
    allow_list: &'a [Identity],
    submitter: &Identity,
) -> Result<Option<&'a Identity>, CryptoError> {
    for entry in allow_list {
        if entry.same_principal(submitter) && validate_identity(entry)? {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}

/// Whether `submitter` may write against the inode at `referenced`.
///
/// Fetches the referenced block from `inode_store`. A hash the store does
/// not know, and a block with no allow-list (a data block), both answer
/// `false`.
///
/// # Errors
/// * `MiddlewareError::BackendUnavailable` - Store call failed
/// * `MiddlewareError::BackendTimeout` - Store call exceeded `timeout`
/// * `MiddlewareError::Crypto` - Malformed key inside an allow-list entry
pub async fn is_authorized<S>(
    submitter: &Identity,
    referenced: &BlockHash,
    inode_store: &S,
    timeout: Duration,
) -> Result<bool, MiddlewareError>
where
    S: BlockStoreClient + ?Sized,
{
    let fetched = bounded_call(
        StoreKind::Inode,
        StoreOperation::Get,
        timeout,
        inode_store.get(referenced),
    )
    .await?;

    let Some(predecessor) = fetched else {
        debug!(referenced = %referenced, "referenced inode not found");
        return Ok(false);
    };

    let entry = find_authorizing_entry(predecessor.write_allow_list(), submitter)?;
    Ok(entry.is_some())
}
