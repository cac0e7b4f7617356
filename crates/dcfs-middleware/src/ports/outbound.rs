//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the middleware needs: the two block stores and a clock.

use crate::domain::entities::{StoreKind, StoreOperation};
use crate::domain::errors::MiddlewareError;
use async_trait::async_trait;
use dcfs_types::{BlockHash, LedgerBlock, PutResponse};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Error from a block store call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Connection, TLS or I/O failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status
    #[error("Store answered {status}: {message}")]
    Status { status: u16, message: String },

    /// The store's answer could not be decoded
    #[error("Malformed store response: {0}")]
    Decode(String),

    /// The store failed internally
    #[error("Store internal error: {0}")]
    Internal(String),
}

/// Client for one content-addressed block store.
///
/// The store computes the hash of every block it accepts. A `get` that
/// returns `None` means the hash is unknown to the store.
#[async_trait]
pub trait BlockStoreClient: Send + Sync {
    /// Submit a finalized block.
    ///
    /// # Errors
    /// * `StoreError::Transport` - Store unreachable
    /// * `StoreError::Status` - Store refused the request
    async fn put(&self, block: LedgerBlock) -> Result<PutResponse, StoreError>;

    /// Fetch a block by its content hash.
    async fn get(&self, hash: &BlockHash) -> Result<Option<LedgerBlock>, StoreError>;
}

#[async_trait]
impl<T: BlockStoreClient + ?Sized> BlockStoreClient for Arc<T> {
    async fn put(&self, block: LedgerBlock) -> Result<PutResponse, StoreError> {
        (**self).put(block).await
    }

    async fn get(&self, hash: &BlockHash) -> Result<Option<LedgerBlock>, StoreError> {
        (**self).get(hash).await
    }
}

/// Source of ledger timestamps, nanoseconds since the Unix epoch.
pub trait TimeSource: Send + Sync {
    /// Current timestamp. Successive calls never return the same value or
    /// go backwards.
    fn now_nanos(&self) -> i64;
}

/// Run one store call under `timeout`, mapping both failure modes onto
/// `MiddlewareError`.
pub(crate) async fn bounded_call<T, F>(
    store: StoreKind,
    operation: StoreOperation,
    timeout: Duration,
    call: F,
) -> Result<T, MiddlewareError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(MiddlewareError::BackendUnavailable {
            store,
            operation,
            source,
        }),
        Err(_) => Err(MiddlewareError::BackendTimeout {
            store,
            operation,
            timeout,
        }),
    }
}
