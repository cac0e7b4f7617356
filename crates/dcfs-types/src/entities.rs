//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Principals**: `Identity`
//! - **Client records**: `ContentBlock`, `Payload`, `InodePayload`, `DataPayload`
//! - **Persisted records**: `LedgerBlock`, `BlockHash`
//!
//! Byte fields are rendered as lowercase hex in human-readable formats. The
//! canonical (signed) encoding is produced by `dcfs-crypto`.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use std::fmt;

// =============================================================================
// CLUSTER A: PRINCIPALS
// =============================================================================

/// A cryptographic principal.
///
/// Valid iff `signature` verifies against `public_key` over the record with
/// `signature` cleared.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Opaque identifier.
    #[serde_as(as = "Hex")]
    pub uid: Vec<u8>,
    /// SPKI PEM encoded public key.
    #[serde_as(as = "Hex")]
    pub public_key: Vec<u8>,
    /// Self-signature over the record with this field cleared.
    #[serde_as(as = "Hex")]
    #[serde(default)]
    pub signature: Vec<u8>,
}

impl Identity {
    /// Create an identity that has not been self-signed yet.
    pub fn unsigned(uid: impl Into<Vec<u8>>, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            uid: uid.into(),
            public_key: public_key.into(),
            signature: Vec::new(),
        }
    }

    /// Same principal: equal `uid` and equal `public_key`. Signatures are
    /// not compared.
    pub fn same_principal(&self, other: &Identity) -> bool {
        self.public_key == other.public_key && self.uid == other.uid
    }
}

// =============================================================================
// CLUSTER B: CHAIN LINKAGE
// =============================================================================

/// Store-assigned, content-addressed identifier of a ledger block.
///
/// Lowercase hex SHA-256. The empty string is the genesis sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHash(String);

impl BlockHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Predecessor marker of the first block in a chain.
    pub fn genesis() -> Self {
        Self(String::new())
    }

    pub fn is_genesis(&self) -> bool {
        self.0.is_empty()
    }

    /// 64 lowercase hex characters, the only shape a store ever assigns.
    pub fn is_digest(&self) -> bool {
        self.0.len() == 64
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_genesis() {
            f.write_str("<genesis>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<String> for BlockHash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BlockHash {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// =============================================================================
// CLUSTER C: CLIENT RECORDS
// =============================================================================

/// Inode type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InodeKind {
    #[default]
    File,
    Directory,
}

/// Inode payload: filesystem metadata plus the write allow-list that
/// governs every chain anchored at this inode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InodePayload {
    pub filename: String,
    pub size: u64,
    pub kind: InodeKind,
    /// Hashes of the data blocks that make up the file.
    pub hashes: Vec<BlockHash>,
    /// Ordered; order carries no meaning but is preserved.
    pub write_allow_list: Vec<Identity>,
}

/// Data payload: opaque file content.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataPayload {
    #[serde_as(as = "Hex")]
    pub data: Vec<u8>,
}

/// What a content block carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Payload {
    Inode(InodePayload),
    Data(DataPayload),
}

impl Payload {
    /// The write allow-list carried by this payload. Data payloads carry
    /// none, so nothing can be authorized against them.
    pub fn write_allow_list(&self) -> &[Identity] {
        match self {
            Payload::Inode(inode) => &inode.write_allow_list,
            Payload::Data(_) => &[],
        }
    }

    pub fn is_inode(&self) -> bool {
        matches!(self, Payload::Inode(_))
    }
}

/// A client-submitted, client-signed mutation.
///
/// Valid iff `updated_by` is a valid identity and `signature` verifies
/// against `updated_by.public_key` over the block with `signature` cleared.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    /// Predecessor in this chain, or the genesis sentinel.
    pub prev_hash: BlockHash,
    /// Submitter.
    pub updated_by: Identity,
    /// Submitter's signature.
    #[serde_as(as = "Hex")]
    #[serde(default)]
    pub signature: Vec<u8>,
    pub payload: Payload,
}

// =============================================================================
// CLUSTER D: PERSISTED RECORDS
// =============================================================================

/// The unit persisted by a block store.
///
/// `timestamp` and `signature` are set by the middleware only. The
/// client's signature stays inside `content` and is used for authorization,
/// never for storage-layer trust.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerBlock {
    /// Copied from `content.prev_hash`.
    pub prev_hash: BlockHash,
    pub content: ContentBlock,
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
    /// Middleware signature under the store-specific key; empty when
    /// signing is disabled.
    #[serde_as(as = "Hex")]
    #[serde(default)]
    pub signature: Vec<u8>,
}

impl LedgerBlock {
    /// Allow-list embedded in this block, empty unless it holds an inode.
    pub fn write_allow_list(&self) -> &[Identity] {
        self.content.payload.write_allow_list()
    }
}
