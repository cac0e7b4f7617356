//! # Block Finalizer
//!
//! Wraps an accepted content block into a ledger block: copies the
//! predecessor link, stamps the current time and signs with the key of the
//! store the block is bound for.

use crate::ports::outbound::TimeSource;
use dcfs_crypto::{sign_in_place, CryptoError, PrivateSigningKey};
use dcfs_types::{ContentBlock, LedgerBlock};
use std::sync::Arc;

/// Produces signed, timestamped ledger blocks.
#[derive(Clone)]
pub struct BlockFinalizer {
    clock: Arc<dyn TimeSource>,
    sign_blocks: bool,
}

impl BlockFinalizer {
    /// `sign_blocks = false` leaves the ledger signature empty.
    pub fn new(clock: Arc<dyn TimeSource>, sign_blocks: bool) -> Self {
        Self { clock, sign_blocks }
    }

    /// Build the ledger block for `content`.
    ///
    /// `prev_hash` is copied verbatim, the content block is embedded
    /// unchanged and the signature covers everything else.
    pub fn finalize(
        &self,
        content: ContentBlock,
        key: &PrivateSigningKey,
    ) -> Result<LedgerBlock, CryptoError> {
        let mut block = LedgerBlock {
            prev_hash: content.prev_hash.clone(),
            content,
            timestamp: self.clock.now_nanos(),
            signature: Vec::new(),
        };
        if self.sign_blocks {
            sign_in_place(&mut block, key)?;
        }
        Ok(block)
    }
}

impl std::fmt::Debug for BlockFinalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockFinalizer")
            .field("sign_blocks", &self.sign_blocks)
            .finish_non_exhaustive()
    }
}
