//! Domain layer: pure middleware logic.
//!
//! Store access goes through the outbound port only.

pub mod acl;
pub mod entities;
pub mod errors;
pub mod finalizer;
pub mod pipeline;
