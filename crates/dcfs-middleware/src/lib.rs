//! # DCFS Trust Middleware
//!
//! Sits between DCFS clients and the two block stores (inode store, data
//! store). Every mutation is authenticated, authorized against the
//! write-allow-list of the inode it references, stamped and signed by the
//! middleware, then forwarded to the right store.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): ACL resolution, block finalization, pipeline stages
//! - **Ports Layer** (`ports/`): `MutationApi` (inbound) and `BlockStoreClient` (outbound)
//! - **Service Layer** (`service.rs`): The request orchestrator wiring both sides
//! - **Adapters Layer** (`adapters/`): In-memory store, HTTP store client, system clock
//!
//! ## Security Notes
//!
//! - **Fail-closed**: Any authentication or authorization failure yields
//!   `success: false` and nothing is written.
//! - **Store-specific keys**: Inode blocks are only ever signed with the inode
//!   key, data blocks only with the data key.
//! - **Authorization source**: The allow-list is always read from the inode
//!   store, for both inode and data mutations.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use adapters::http::HttpBlockStoreClient;
pub use adapters::memory::InMemoryBlockStore;
pub use adapters::time::SystemTimeSource;
pub use domain::acl::{find_authorizing_entry, is_authorized};
pub use domain::entities::{
    MiddlewareConfig, MutationKind, SigningKeys, StoreKind, StoreOperation, DEFAULT_STORE_TIMEOUT,
};
pub use domain::errors::{MiddlewareError, RejectionReason};
pub use domain::finalizer::BlockFinalizer;
pub use domain::pipeline::{PipelineStage, RequestPipeline};
pub use ports::inbound::MutationApi;
pub use ports::outbound::{BlockStoreClient, StoreError, TimeSource};
pub use service::MiddlewareService;
