//! Adapters layer: concrete stores and the system clock.

pub mod http;
pub mod memory;
pub mod time;
