//! Test fixtures: cached RSA keys and pre-signed records.
//!
//! RSA key generation is slow in debug builds, so a small pool of keys is
//! generated once per test binary and shared.

#![allow(missing_docs)]

use crate::codec::sign_in_place;
use crate::keys::PrivateSigningKey;
use crate::records::issue_identity;
use dcfs_types::{
    BlockHash, ContentBlock, DataPayload, Identity, InodeKind, InodePayload, LedgerBlock, Payload,
};
use std::sync::OnceLock;

/// Number of cached fixture keys.
pub const FIXTURE_KEYS: usize = 6;

/// Modulus size of fixture keys. Large enough for PKCS#1 v1.5 / SHA-256.
pub const FIXTURE_KEY_BITS: usize = 1024;

static KEYS: OnceLock<Vec<PrivateSigningKey>> = OnceLock::new();

/// Cached key number `index` (`0..FIXTURE_KEYS`).
pub fn fixture_key(index: usize) -> &'static PrivateSigningKey {
    let keys = KEYS.get_or_init(|| {
        (0..FIXTURE_KEYS)
            .map(|_| PrivateSigningKey::generate(FIXTURE_KEY_BITS).expect("fixture key generation"))
            .collect()
    });
    &keys[index]
}

/// Self-signed identity for fixture key `index`, uid `user-{index}`.
pub fn fixture_identity(index: usize) -> Identity {
    issue_identity(format!("user-{}", index).into_bytes(), fixture_key(index))
        .expect("fixture identity")
}

/// Unsigned data block submitted by fixture identity 0.
pub fn sample_content_block() -> ContentBlock {
    ContentBlock {
        prev_hash: BlockHash::genesis(),
        updated_by: fixture_identity(0),
        signature: Vec::new(),
        payload: Payload::Data(DataPayload {
            data: b"sample".to_vec(),
        }),
    }
}

/// Unsigned ledger block wrapping `sample_content_block`.
pub fn sample_ledger_block() -> LedgerBlock {
    LedgerBlock {
        prev_hash: BlockHash::genesis(),
        content: sample_content_block(),
        timestamp: 1_700_000_000_000_000_000,
        signature: Vec::new(),
    }
}

/// Data block submitted and signed by fixture identity `index`.
pub fn signed_data_block(index: usize, prev_hash: &str, data: &[u8]) -> ContentBlock {
    let mut block = ContentBlock {
        prev_hash: BlockHash::from(prev_hash),
        updated_by: fixture_identity(index),
        signature: Vec::new(),
        payload: Payload::Data(DataPayload {
            data: data.to_vec(),
        }),
    };
    sign_in_place(&mut block, fixture_key(index)).expect("sign fixture block");
    block
}

/// Directory inode submitted and signed by fixture identity `index`.
pub fn signed_inode_block(index: usize, prev_hash: &str, allow_list: Vec<Identity>) -> ContentBlock {
    let mut block = ContentBlock {
        prev_hash: BlockHash::from(prev_hash),
        updated_by: fixture_identity(index),
        signature: Vec::new(),
        payload: Payload::Inode(InodePayload {
            filename: String::new(),
            size: 0,
            kind: InodeKind::Directory,
            hashes: Vec::new(),
            write_allow_list: allow_list,
        }),
    };
    sign_in_place(&mut block, fixture_key(index)).expect("sign fixture block");
    block
}
