//! # Wire Types
//!
//! Request and response bodies for the inbound mutation service and for the
//! block-store protocol. Field names are camelCase on the wire.

use crate::entities::{BlockHash, ContentBlock, LedgerBlock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// INBOUND SERVICE
// =============================================================================

/// Body of `MutateInode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutateInodeRequest {
    pub block: ContentBlock,
}

/// Body of `MutateData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateDataRequest {
    pub block: ContentBlock,
    /// Inode whose allow-list governs this data mutation.
    pub inode_hash: BlockHash,
}

/// Result of a mutation.
///
/// A rejected submission carries neither `hash` nor `block`, and never a
/// reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<BlockHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<LedgerBlock>,
}

impl MutationResponse {
    /// Fail-closed answer for authentication and authorization failures.
    pub fn rejected() -> Self {
        Self {
            success: false,
            hash: None,
            block: None,
        }
    }

    /// The block was persisted under `hash`.
    pub fn accepted(hash: BlockHash, block: LedgerBlock) -> Self {
        Self {
            success: true,
            hash: Some(hash),
            block: Some(block),
        }
    }

    /// The store refused the block (for example, it already holds it).
    pub fn not_persisted(hash: BlockHash) -> Self {
        Self {
            success: false,
            hash: Some(hash),
            block: None,
        }
    }
}

// =============================================================================
// BLOCK STORE PROTOCOL
// =============================================================================

/// Body of a store `Put`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutRequest {
    pub block: LedgerBlock,
}

/// Result of a store `Put`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutResponse {
    pub success: bool,
    pub hash: BlockHash,
}

/// Result of a store `Get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetResponse {
    pub block: LedgerBlock,
}

/// Current chain tips of a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafsResponse {
    pub leaf_ids: Vec<BlockHash>,
}

/// Full contents of a development store, used to seed it at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub blocks: BTreeMap<BlockHash, LedgerBlock>,
    pub leafs: Vec<BlockHash>,
}
