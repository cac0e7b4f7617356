//! # Node Configuration
//!
//! JSON deployment file plus environment overrides.
//!
//! ```json
//! {
//!   "isCryptoEnabled": true,
//!   "address": "127.0.0.1",
//!   "port": 50052,
//!   "inodeServer": { "url": "http://127.0.0.1:50051", "signingKey": "inode.pem" },
//!   "dataServer":  { "url": "http://127.0.0.1:50050", "signingKey": "data.pem" }
//! }
//! ```
//!
//! Environment overrides: `DCFS_ADDRESS`, `DCFS_PORT`, `DCFS_ENABLE_CRYPTO`,
//! `DCFS_LOG`.

use dcfs_crypto::{CryptoError, PrivateSigningKey};
use dcfs_gateway::GatewayConfig;
use dcfs_middleware::{MiddlewareConfig, SigningKeys, StoreKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    /// Authentication, authorization and block signing. Off is insecure.
    #[serde(default = "default_crypto_enabled")]
    pub is_crypto_enabled: bool,
    /// Interface the middleware listens on.
    #[serde(default = "default_address")]
    pub address: String,
    /// Port the middleware listens on.
    pub port: u16,
    /// Inbound TLS material. Termination happens in front of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<InboundTlsConfig>,
    /// Inode store endpoint and signing key.
    pub inode_server: StoreEndpointConfig,
    /// Data store endpoint and signing key.
    pub data_server: StoreEndpointConfig,
    /// Upper bound on each store call, in milliseconds.
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    /// `tracing` filter directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Server-side TLS material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundTlsConfig {
    pub certificate: PathBuf,
    pub private_key: PathBuf,
}

/// One block store: where it is and which key signs blocks bound for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEndpointConfig {
    pub url: String,
    /// PKCS#8 PEM private key.
    pub signing_key: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<StoreTlsConfig>,
}

/// Trust root for one store's TLS certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreTlsConfig {
    /// PEM certificate authority.
    pub ca: PathBuf,
}

fn default_crypto_enabled() -> bool {
    true
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_store_timeout_ms() -> u64 {
    1_000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A referenced file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for `NodeConfig`.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },

    #[error("port cannot be 0")]
    InvalidPort,

    #[error("{0} store url cannot be empty")]
    EmptyUrl(StoreKind),

    #[error("storeTimeoutMs cannot be 0")]
    ZeroTimeout,

    #[error("TLS file does not exist: {0}")]
    MissingTlsFile(PathBuf),

    /// Crypto is disabled; refused outside development.
    #[error(
        "SECURITY VIOLATION: isCryptoEnabled is false. Mutations would be \
         neither authenticated nor authorized."
    )]
    CryptoDisabled,

    /// A signing key could not be loaded.
    #[error("cannot load {store} signing key: {source}")]
    SigningKey {
        store: StoreKind,
        #[source]
        source: CryptoError,
    },
}

impl NodeConfig {
    /// Read the JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup("DCFS_ADDRESS") {
            self.address = address;
        }
        if let Some(port) = lookup("DCFS_PORT") {
            self.port = port.parse().map_err(|_| ConfigError::Env {
                var: "DCFS_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(flag) = lookup("DCFS_ENABLE_CRYPTO") {
            self.is_crypto_enabled = match flag.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Env {
                        var: "DCFS_ENABLE_CRYPTO",
                        value: flag,
                    })
                }
            };
        }
        if let Some(level) = lookup("DCFS_LOG") {
            self.log_level = level;
        }
        Ok(())
    }

    /// Structural checks. Does not touch key files.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        for (store, endpoint) in self.stores() {
            if endpoint.url.trim().is_empty() {
                return Err(ConfigError::EmptyUrl(store));
            }
        }
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if let Some(tls) = &self.tls {
            for path in [&tls.certificate, &tls.private_key] {
                if !path.exists() {
                    return Err(ConfigError::MissingTlsFile(path.clone()));
                }
            }
        }
        Ok(())
    }

    /// `validate` plus the checks a production deployment must pass.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if !self.is_crypto_enabled {
            return Err(ConfigError::CryptoDisabled);
        }
        Ok(())
    }

    /// Both stores, inode first.
    pub fn stores(&self) -> [(StoreKind, &StoreEndpointConfig); 2] {
        [
            (StoreKind::Inode, &self.inode_server),
            (StoreKind::Data, &self.data_server),
        ]
    }

    pub fn store(&self, kind: StoreKind) -> &StoreEndpointConfig {
        match kind {
            StoreKind::Inode => &self.inode_server,
            StoreKind::Data => &self.data_server,
        }
    }

    /// Load both signing keys.
    pub fn load_signing_keys(&self) -> Result<SigningKeys, ConfigError> {
        let load = |store: StoreKind| {
            PrivateSigningKey::read_pkcs8_pem_file(&self.store(store).signing_key)
                .map_err(|source| ConfigError::SigningKey { store, source })
        };
        Ok(SigningKeys::new(load(StoreKind::Inode)?, load(StoreKind::Data)?))
    }

    /// PEM CA trusted for `store`, if one is configured.
    pub fn read_store_ca(&self, store: StoreKind) -> Result<Option<Vec<u8>>, ConfigError> {
        let Some(tls) = &self.store(store).tls else {
            return Ok(None);
        };
        std::fs::read(&tls.ca)
            .map(Some)
            .map_err(|source| ConfigError::Io {
                path: tls.ca.clone(),
                source,
            })
    }

    pub fn middleware_config(&self) -> MiddlewareConfig {
        MiddlewareConfig {
            enable_crypto: self.is_crypto_enabled,
            store_timeout: Duration::from_millis(self.store_timeout_ms),
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            address: self.address.clone(),
            port: self.port,
            ..GatewayConfig::default()
        }
    }
}
