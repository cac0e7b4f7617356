#![allow(missing_docs)]

//! DCFS Gateway - HTTP surface of the trust middleware.
//!
//! # Architecture
//!
//! ```text
//!   client ──POST /v1/inode──┐
//!   client ──POST /v1/data───┤
//!                            ▼
//!              ┌───────────────────────────┐
//!              │  BodyLimit → Trace → Timeout │
//!              └─────────────┬─────────────┘
//!                            ▼
//!                  MutationApi (middleware)
//!                      │            │
//!            HTTP store client   HTTP store client
//!                      ▼            ▼
//!                inode store     data store
//!                (store router)  (store router)
//! ```
//!
//! The same crate serves both sides: `mutation_router` for clients and
//! `store_router` for the in-memory development store.
//!
//! # Status Codes
//!
//! - A rejected mutation is `200 OK` with `{"success": false}`.
//! - An unreachable store is `502`, a store timeout `504`, anything else
//!   that kept the middleware from answering is `500`.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod store;

// Re-exports for public API
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use routes::mutation_router;
pub use service::{bind, serve};
pub use store::store_router;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
