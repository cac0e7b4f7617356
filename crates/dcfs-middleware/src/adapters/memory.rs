use crate::ports::outbound::{BlockStoreClient, StoreError};
use async_trait::async_trait;
use dcfs_crypto::{block_hash, CryptoError};
use dcfs_types::{BlockHash, LedgerBlock, PutResponse, StoreSnapshot};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct StoreState {
    blocks: HashMap<BlockHash, LedgerBlock>,
    leafs: Vec<BlockHash>,
}

/// In-memory content-addressed block store.
///
/// Backs the development store server and the test suites. Tracks chain
/// tips: a newly stored block becomes a leaf and its predecessor stops being
/// one.
#[derive(Debug, Default)]
pub struct InMemoryBlockStore {
    state: RwLock<StoreState>,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from a snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            state: RwLock::new(StoreState {
                blocks: snapshot.blocks.into_iter().collect(),
                leafs: snapshot.leafs,
            }),
        }
    }

    /// Copy of the full store contents.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read();
        StoreSnapshot {
            blocks: state
                .blocks
                .iter()
                .map(|(hash, block)| (hash.clone(), block.clone()))
                .collect(),
            leafs: state.leafs.clone(),
        }
    }

    /// Hash and store `block`. A block already present is not stored again
    /// and answers `success: false`.
    pub fn insert(&self, block: LedgerBlock) -> Result<PutResponse, CryptoError> {
        let hash = block_hash(&block)?;
        let mut state = self.state.write();
        if state.blocks.contains_key(&hash) {
            return Ok(PutResponse {
                success: false,
                hash,
            });
        }
        state.leafs.retain(|leaf| leaf != &block.prev_hash);
        state.leafs.push(hash.clone());
        state.blocks.insert(hash.clone(), block);
        Ok(PutResponse {
            success: true,
            hash,
        })
    }

    pub fn block(&self, hash: &BlockHash) -> Option<LedgerBlock> {
        self.state.read().blocks.get(hash).cloned()
    }

    pub fn contains(&self, hash: &BlockHash) -> bool {
        self.state.read().blocks.contains_key(hash)
    }

    /// Current chain tips, oldest first.
    pub fn leafs(&self) -> Vec<BlockHash> {
        self.state.read().leafs.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlockStoreClient for InMemoryBlockStore {
    async fn put(&self, block: LedgerBlock) -> Result<PutResponse, StoreError> {
        self.insert(block)
            .map_err(|e| StoreError::Internal(e.to_string()))
    }

    async fn get(&self, hash: &BlockHash) -> Result<Option<LedgerBlock>, StoreError> {
        Ok(self.block(hash))
    }
}
