//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Interface to bind
    pub address: String,
    /// Port to bind
    pub port: u16,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Upper bound on a whole request, in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8080,
            max_body_bytes: 16 * 1024 * 1024,
            request_timeout_ms: 10_000,
        }
    }
}

impl GatewayConfig {
    /// `address:port`, as handed to the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("address cannot be empty".into());
        }
        if self.max_body_bytes == 0 {
            return Err("maxBodyBytes cannot be 0".into());
        }
        if self.request_timeout_ms == 0 {
            return Err("requestTimeoutMs cannot be 0".into());
        }
        Ok(())
    }
}
