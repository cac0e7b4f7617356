//! HTTP client for a remote block store.
//!
//! Protocol:
//! - `POST {base}/put` with `{"block": ...}`, answers `{"success", "hash"}`
//! - `GET {base}/blocks/{hash}`, answers `{"block": ...}` or 404

use crate::ports::outbound::{BlockStoreClient, StoreError};
use async_trait::async_trait;
use dcfs_types::{BlockHash, GetResponse, LedgerBlock, PutRequest, PutResponse};
use reqwest::{Certificate, Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Block store reached over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpBlockStoreClient {
    client: Client,
    base_url: String,
}

impl HttpBlockStoreClient {
    /// Client for the store at `base_url`.
    ///
    /// `ca_pem` is the PEM certificate authority trusted for this store
    /// only. Without one, the platform roots apply.
    pub fn new(base_url: impl Into<String>, ca_pem: Option<&[u8]>) -> Result<Self, StoreError> {
        let mut builder = Client::builder()
            .use_rustls_tls()
            .connect_timeout(Duration::from_secs(2));

        if let Some(pem) = ca_pem {
            if !String::from_utf8_lossy(pem).contains("-----BEGIN CERTIFICATE-----") {
                return Err(StoreError::Transport(
                    "CA file contains no PEM certificate".into(),
                ));
            }
            let ca = Certificate::from_pem(pem)
                .map_err(|e| StoreError::Transport(format!("invalid CA certificate: {}", e)))?;
            builder = builder.add_root_certificate(ca);
        }

        let client = builder
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

#[async_trait]
impl BlockStoreClient for HttpBlockStoreClient {
    async fn put(&self, block: LedgerBlock) -> Result<PutResponse, StoreError> {
        let response = self
            .client
            .post(format!("{}/put", self.base_url))
            .json(&PutRequest { block })
            .send()
            .await
            .map_err(transport)?;

        Self::check_status(response)
            .await?
            .json::<PutResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn get(&self, hash: &BlockHash) -> Result<Option<LedgerBlock>, StoreError> {
        // Nothing but a digest goes into the URL path.
        if !hash.is_digest() {
            debug!(%hash, store = %self.base_url, "not a block digest, treated as not found");
            return Ok(None);
        }

        let response = self
            .client
            .get(format!("{}/blocks/{}", self.base_url, hash.as_str()))
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%hash, store = %self.base_url, "block not found");
            return Ok(None);
        }

        let body = Self::check_status(response)
            .await?
            .json::<GetResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(body.block))
    }
}
