//! # DCFS Node
//!
//! The executable's library half.
//!
//! ## Modules
//!
//! - `config/` - Deployment file, environment overrides, key loading
//! - `genesis/` - Seeds a fresh pair of stores with root blocks
//! - `logging/` - `tracing` subscriber setup
//! - `runtime/` - Wires configuration to running servers
//!
//! ## Startup Sequence (`serve`)
//!
//! 1. Load configuration (file, then environment)
//! 2. Install logging at the configured level
//! 3. Validate (production mode refuses disabled crypto)
//! 4. Load both signing keys and build both store clients
//! 5. Bind and serve until Ctrl+C

pub mod config;
pub mod genesis;
pub mod logging;
pub mod runtime;

pub use config::{ConfigError, NodeConfig};
pub use genesis::{build_genesis, write_snapshots, GenesisInputs, GenesisOutput};
pub use runtime::{build_middleware, run_middleware, run_store, shutdown_signal};
