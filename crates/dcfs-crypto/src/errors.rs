//! Crypto error types.

use std::path::PathBuf;
use thiserror::Error;

/// Cryptographic operation errors.
///
/// A signature that does not verify is not an error; see [`crate::verify`].
#[derive(Debug, Error)]
pub enum CryptoError {
    /// PEM container is malformed or holds an unsupported key type
    #[error("Key format error: {0}")]
    KeyFormat(String),

    /// Key file could not be read
    #[error("Failed to read key file {path}: {source}")]
    KeyFile {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Record could not be canonically encoded
    #[error("Canonical encoding failed: {0}")]
    Encoding(String),

    /// Signing primitive failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),
}

impl CryptoError {
    /// Whether this is a key format problem (as opposed to an I/O or
    /// signing failure).
    pub fn is_key_format(&self) -> bool {
        matches!(self, CryptoError::KeyFormat(_))
    }
}
