//! Ports layer: trait boundaries of the middleware.

pub mod inbound;
pub mod outbound;
