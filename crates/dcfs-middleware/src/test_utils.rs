//! Test doubles and builders shared by the middleware, gateway and
//! integration suites.

use crate::adapters::memory::InMemoryBlockStore;
use crate::domain::entities::SigningKeys;
use crate::ports::outbound::{BlockStoreClient, StoreError, TimeSource};
use async_trait::async_trait;
use dcfs_crypto::sign_in_place;
use dcfs_types::{BlockHash, ContentBlock, Identity, LedgerBlock, PutResponse};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub use dcfs_crypto::test_helpers::*;

/// Fixture key index used as the middleware's inode signing key.
pub const INODE_KEY: usize = 4;
/// Fixture key index used as the middleware's data signing key.
pub const DATA_KEY: usize = 5;

/// Signing keys backed by fixture keys `INODE_KEY` and `DATA_KEY`.
pub fn test_signing_keys() -> SigningKeys {
    SigningKeys::new(fixture_key(INODE_KEY).clone(), fixture_key(DATA_KEY).clone())
}

/// Clock that always answers the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub i64);

impl TimeSource for FixedTimeSource {
    fn now_nanos(&self) -> i64 {
        self.0
    }
}

/// Behaviour of a `RecordingStore` on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreFailure {
    #[default]
    Healthy,
    /// Every call fails with a transport error
    Unavailable,
    /// Every call sleeps this long before answering
    Stall(Duration),
}

/// In-memory store that counts calls and can be told to misbehave.
///
/// Clones share state, so a test can keep a handle after moving one into
/// the service.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    inner: Arc<InMemoryBlockStore>,
    puts: Arc<AtomicUsize>,
    gets: Arc<AtomicUsize>,
    failure: Arc<Mutex<StoreFailure>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backing(&self) -> &InMemoryBlockStore {
        &self.inner
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn fail_with(&self, failure: StoreFailure) {
        *self.failure.lock() = failure;
    }

    /// Store `block` directly, bypassing the call counters.
    pub fn seed(&self, block: LedgerBlock) -> BlockHash {
        self.inner.insert(block).expect("seed block").hash
    }

    async fn misbehave(&self) -> Result<(), StoreError> {
        let failure = *self.failure.lock();
        match failure {
            StoreFailure::Healthy => Ok(()),
            StoreFailure::Unavailable => Err(StoreError::Transport("connection refused".into())),
            StoreFailure::Stall(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl BlockStoreClient for RecordingStore {
    async fn put(&self, block: LedgerBlock) -> Result<PutResponse, StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.misbehave().await?;
        self.inner.put(block).await
    }

    async fn get(&self, hash: &BlockHash) -> Result<Option<LedgerBlock>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.misbehave().await?;
        self.inner.get(hash).await
    }
}

/// Ledger block as the middleware would produce it, signed with the inode
/// key.
pub fn ledger_from(content: ContentBlock, timestamp: i64) -> LedgerBlock {
    let mut block = LedgerBlock {
        prev_hash: content.prev_hash.clone(),
        content,
        timestamp,
        signature: Vec::new(),
    };
    sign_in_place(&mut block, fixture_key(INODE_KEY)).expect("sign ledger block");
    block
}

/// Seed a root directory inode, created by fixture identity 0, whose
/// allow-list is `allow_list`. Returns its hash.
pub fn seed_inode(store: &RecordingStore, allow_list: Vec<Identity>) -> BlockHash {
    store.seed(ledger_from(signed_inode_block(0, "", allow_list), 1))
}
