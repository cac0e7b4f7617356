//! # DCFS Types Crate
//!
//! Domain records of the DataCapsule filesystem as seen by the middleware.
//!
//! ## Design Principles
//!
//! - **Client records are transient**: a `ContentBlock` is validated and then
//!   wrapped, it is never persisted on its own.
//! - **Stores persist ledger blocks only**: a `LedgerBlock` is created fresh by
//!   the middleware for every accepted request and never mutated afterwards.
//! - **Payloads are a sum type**: only an inode payload can carry an
//!   allow-list, so a data block can never authorize anything.

pub mod entities;
pub mod wire;

pub use entities::*;
pub use wire::*;
