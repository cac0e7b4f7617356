//! # Inbound Ports (Driving Ports / API)
//!
//! The two mutations the middleware offers to clients.

use crate::domain::errors::MiddlewareError;
use async_trait::async_trait;
use dcfs_types::{BlockHash, ContentBlock, MutationResponse};

/// Client-facing mutation API.
///
/// A rejected request is `Ok` with `success: false`. `Err` is reserved for
/// failures that kept the middleware from reaching or carrying out a
/// verdict.
#[async_trait]
pub trait MutationApi: Send + Sync {
    /// Create or update an inode.
    ///
    /// Authorized against the inode at `block.prev_hash`.
    async fn mutate_inode(&self, block: ContentBlock) -> Result<MutationResponse, MiddlewareError>;

    /// Append file content.
    ///
    /// Authorized against the inode at `inode_hash`, which may be any inode
    /// the client chooses, including an older version.
    async fn mutate_data(
        &self,
        block: ContentBlock,
        inode_hash: BlockHash,
    ) -> Result<MutationResponse, MiddlewareError>;
}
