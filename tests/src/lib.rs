//! # DCFS Test Suite
//!
//! Cross-crate tests that need more than one crate at a time.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs        # Ephemeral servers on loopback
//!     ├── authorization.rs  # Pipeline scenarios over in-memory stores
//!     └── end_to_end.rs     # Middleware and stores talking HTTP
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dcfs-tests
//! cargo test -p dcfs-tests integration::end_to_end::
//! ```

pub mod integration;
