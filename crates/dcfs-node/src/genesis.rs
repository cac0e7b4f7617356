//! # Genesis
//!
//! Seeds a fresh pair of block stores.
//!
//! The inode store gets a root directory whose allow-list holds exactly one
//! client identity; the data store gets an empty data block. Both are
//! finalized at timestamp 0, so the same inputs always produce the same
//! root hashes.

use dcfs_crypto::{sign_in_place, CryptoError, PrivateSigningKey, PublicVerifyingKey};
use dcfs_middleware::{BlockFinalizer, InMemoryBlockStore, TimeSource};
use dcfs_types::{
    BlockHash, ContentBlock, DataPayload, Identity, InodeKind, InodePayload, Payload, StoreSnapshot,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Snapshot file name for the inode store.
pub const INODE_SNAPSHOT: &str = "inode_store.json";
/// Snapshot file name for the data store.
pub const DATA_SNAPSHOT: &str = "data_store.json";

/// Genesis creation errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The client's public key does not belong to its signing key.
    #[error("client public key does not match client signing key")]
    KeyMismatch,

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Everything genesis needs.
#[derive(Debug, Clone)]
pub struct GenesisInputs {
    pub client_key: PrivateSigningKey,
    /// SPKI PEM, embedded verbatim in the client identity.
    pub client_public_pem: Vec<u8>,
    pub uid: Vec<u8>,
    pub inode_key: PrivateSigningKey,
    pub data_key: PrivateSigningKey,
}

/// Seeded stores and their roots.
#[derive(Debug)]
pub struct GenesisOutput {
    pub identity: Identity,
    pub inode_root: BlockHash,
    pub data_root: BlockHash,
    pub inode_store: InMemoryBlockStore,
    pub data_store: InMemoryBlockStore,
}

struct GenesisEpoch;

impl TimeSource for GenesisEpoch {
    fn now_nanos(&self) -> i64 {
        0
    }
}

/// Build both genesis blocks and the stores holding them.
pub fn build_genesis(inputs: &GenesisInputs) -> Result<GenesisOutput, GenesisError> {
    let provided = PublicVerifyingKey::from_pem(&inputs.client_public_pem)?;
    if &provided != inputs.client_key.public_key() {
        return Err(GenesisError::KeyMismatch);
    }

    let mut identity = Identity::unsigned(inputs.uid.clone(), inputs.client_public_pem.clone());
    sign_in_place(&mut identity, &inputs.client_key)?;

    let finalizer = BlockFinalizer::new(Arc::new(GenesisEpoch), true);

    let data_content = client_block(
        &identity,
        Payload::Data(DataPayload { data: Vec::new() }),
        &inputs.client_key,
    )?;
    let data_block = finalizer.finalize(data_content, &inputs.data_key)?;

    let inode_content = client_block(
        &identity,
        Payload::Inode(InodePayload {
            filename: String::new(),
            size: 0,
            kind: InodeKind::Directory,
            hashes: Vec::new(),
            write_allow_list: vec![identity.clone()],
        }),
        &inputs.client_key,
    )?;
    let inode_block = finalizer.finalize(inode_content, &inputs.inode_key)?;

    let data_store = InMemoryBlockStore::new();
    let data_root = data_store.insert(data_block)?.hash;
    let inode_store = InMemoryBlockStore::new();
    let inode_root = inode_store.insert(inode_block)?.hash;

    Ok(GenesisOutput {
        identity,
        inode_root,
        data_root,
        inode_store,
        data_store,
    })
}

fn client_block(
    identity: &Identity,
    payload: Payload,
    key: &PrivateSigningKey,
) -> Result<ContentBlock, CryptoError> {
    let mut block = ContentBlock {
        prev_hash: BlockHash::genesis(),
        updated_by: identity.clone(),
        signature: Vec::new(),
        payload,
    };
    sign_in_place(&mut block, key)?;
    Ok(block)
}

/// Write both snapshots into `dir`. Returns the written paths, inode first.
pub fn write_snapshots(output: &GenesisOutput, dir: &Path) -> Result<[PathBuf; 2], GenesisError> {
    std::fs::create_dir_all(dir).map_err(|source| GenesisError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let inode_path = dir.join(INODE_SNAPSHOT);
    let data_path = dir.join(DATA_SNAPSHOT);
    write_snapshot(&output.inode_store.snapshot(), &inode_path)?;
    write_snapshot(&output.data_store.snapshot(), &data_path)?;
    Ok([inode_path, data_path])
}

fn write_snapshot(snapshot: &StoreSnapshot, path: &Path) -> Result<(), GenesisError> {
    let json = serde_json::to_vec_pretty(snapshot)?;
    std::fs::write(path, json).map_err(|source| GenesisError::Write {
        path: path.to_path_buf(),
        source,
    })
}
