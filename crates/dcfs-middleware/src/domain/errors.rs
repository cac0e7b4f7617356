//! # Middleware Errors
//!
//! Two separate outcomes for things that go wrong:
//!
//! - `RejectionReason`: the request was well-formed but not allowed. The
//!   client only ever sees `success: false`.
//! - `MiddlewareError`: the middleware could not reach a verdict or could
//!   not complete the write. Surfaced to the transport as an error.

use crate::domain::entities::{StoreKind, StoreOperation};
use crate::domain::pipeline::PipelineStage;
use crate::ports::outbound::StoreError;
use dcfs_crypto::CryptoError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a mutation.
#[derive(Debug, Error)]
pub enum MiddlewareError {
    /// Malformed key material or an encoding failure
    #[error("Crypto failure: {0}")]
    Crypto(#[from] CryptoError),

    /// The store could not be reached or answered with an error
    #[error("{store} store {operation} failed: {source}")]
    BackendUnavailable {
        store: StoreKind,
        operation: StoreOperation,
        #[source]
        source: StoreError,
    },

    /// The store did not answer within the configured bound
    #[error("{store} store {operation} timed out after {timeout:?}")]
    BackendTimeout {
        store: StoreKind,
        operation: StoreOperation,
        timeout: Duration,
    },

    /// Illegal pipeline transition
    #[error("Pipeline cannot move from {from:?} to {to:?}")]
    Pipeline {
        from: PipelineStage,
        to: PipelineStage,
    },
}

impl MiddlewareError {
    /// True for failures caused by a block store rather than the request.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            MiddlewareError::BackendUnavailable { .. } | MiddlewareError::BackendTimeout { .. }
        )
    }
}

/// Why a request was refused. Never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Bad submitter identity or bad block signature
    AuthenticationFailure,
    /// Submitter is not on the referenced inode's allow-list, or the
    /// referenced inode does not exist
    AuthorizationFailure,
    /// The store declined the finalized block
    NotPersisted,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::AuthenticationFailure => f.write_str("authentication failure"),
            RejectionReason::AuthorizationFailure => f.write_str("authorization failure"),
            RejectionReason::NotPersisted => f.write_str("store declined block"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_classification() {
        let timeout = MiddlewareError::BackendTimeout {
            store: StoreKind::Inode,
            operation: StoreOperation::Get,
            timeout: Duration::from_secs(1),
        };
        let crypto = MiddlewareError::from(CryptoError::KeyFormat("bad".into()));

        assert!(timeout.is_backend());
        assert!(!crypto.is_backend());
    }

    #[test]
    fn test_error_messages_name_the_store() {
        let err = MiddlewareError::BackendUnavailable {
            store: StoreKind::Data,
            operation: StoreOperation::Put,
            source: StoreError::Transport("connection refused".into()),
        };

        assert_eq!(
            err.to_string(),
            "data store put failed: Transport error: connection refused"
        );
    }
}
