//! # Domain Entities
//!
//! Store roles, operation labels and the middleware's runtime settings.

use dcfs_crypto::PrivateSigningKey;
use std::fmt;
use std::time::Duration;

/// Upper bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(1);

/// Which of the two block stores a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Inode store: file and directory metadata, source of every allow-list
    Inode,
    /// Data store: opaque file content
    Data,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Inode => f.write_str("inode"),
            StoreKind::Data => f.write_str("data"),
        }
    }
}

/// Store call being made, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Get,
    Put,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOperation::Get => f.write_str("get"),
            StoreOperation::Put => f.write_str("put"),
        }
    }
}

/// The two client-facing mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Create or update an inode; authorized by its predecessor inode
    Inode,
    /// Append file content; authorized by the owning inode
    Data,
}

impl MutationKind {
    /// Store the finalized block is written to.
    pub fn target_store(self) -> StoreKind {
        match self {
            MutationKind::Inode => StoreKind::Inode,
            MutationKind::Data => StoreKind::Data,
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Inode => f.write_str("MutateInode"),
            MutationKind::Data => f.write_str("MutateData"),
        }
    }
}

/// The middleware's private signing keys, one per store.
///
/// Loaded once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct SigningKeys {
    inode: PrivateSigningKey,
    data: PrivateSigningKey,
}

impl SigningKeys {
    pub fn new(inode: PrivateSigningKey, data: PrivateSigningKey) -> Self {
        Self { inode, data }
    }

    /// Key used to sign blocks bound for `store`.
    pub fn for_store(&self, store: StoreKind) -> &PrivateSigningKey {
        match store {
            StoreKind::Inode => &self.inode,
            StoreKind::Data => &self.data,
        }
    }
}

/// Runtime settings for the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiddlewareConfig {
    /// When false, authentication, authorization and block signing are all
    /// skipped. Insecure; intended for testing only.
    pub enable_crypto: bool,
    /// Upper bound on each individual store get/put.
    pub store_timeout: Duration,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            enable_crypto: true,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}
