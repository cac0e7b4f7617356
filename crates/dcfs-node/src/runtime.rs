//! Wiring: configuration in, running servers out.

use crate::config::{ConfigError, NodeConfig};
use anyhow::{Context, Result};
use dcfs_gateway::{bind, mutation_router, serve, store_router, GatewayConfig};
use dcfs_middleware::{HttpBlockStoreClient, InMemoryBlockStore, MiddlewareService, StoreKind};
use dcfs_types::StoreSnapshot;
use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Middleware wired to both remote stores.
pub type RemoteMiddleware = MiddlewareService<HttpBlockStoreClient, HttpBlockStoreClient>;

/// Load keys, build both store clients and the middleware service.
pub fn build_middleware(config: &NodeConfig) -> Result<RemoteMiddleware> {
    let keys = config.load_signing_keys()?;
    let inode = store_client(config, StoreKind::Inode)?;
    let data = store_client(config, StoreKind::Data)?;
    Ok(MiddlewareService::new(
        inode,
        data,
        keys,
        config.middleware_config(),
    ))
}

fn store_client(config: &NodeConfig, store: StoreKind) -> Result<HttpBlockStoreClient> {
    let ca = config.read_store_ca(store)?;
    let endpoint = config.store(store);
    let client = HttpBlockStoreClient::new(endpoint.url.clone(), ca.as_deref())
        .with_context(|| format!("cannot build {} store client", store))?;
    info!(%store, url = %endpoint.url, custom_ca = ca.is_some(), "store client ready");
    Ok(client)
}

/// Run the middleware until `shutdown` resolves.
pub async fn run_middleware<F>(config: NodeConfig, production: bool, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if production {
        config.validate_for_production()?;
    } else {
        config.validate()?;
        if !config.is_crypto_enabled {
            warn!("{}", ConfigError::CryptoDisabled);
        }
    }
    if config.tls.is_some() {
        info!("inbound TLS is terminated in front of this node");
    }

    let service = build_middleware(&config)?;
    let gateway = config.gateway_config();
    let listener = bind(&gateway).await?;
    let router = mutation_router(Arc::new(service), &gateway);

    serve(listener, router, shutdown).await?;
    Ok(())
}

/// Read a store snapshot written by `genesis`.
pub fn load_snapshot(path: &Path) -> Result<StoreSnapshot> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("malformed snapshot {}", path.display()))
}

/// Run an in-memory block store until `shutdown` resolves.
pub async fn run_store<F>(listen: SocketAddr, snapshot: Option<&Path>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = match snapshot {
        Some(path) => {
            let store = InMemoryBlockStore::from_snapshot(load_snapshot(path)?);
            info!(blocks = store.len(), leafs = ?store.leafs(), "store seeded from snapshot");
            store
        }
        None => InMemoryBlockStore::new(),
    };

    let gateway = GatewayConfig {
        address: listen.ip().to_string(),
        port: listen.port(),
        ..GatewayConfig::default()
    };
    let listener = bind(&gateway).await?;
    let router = store_router(Arc::new(store), &gateway);

    serve(listener, router, shutdown).await?;
    Ok(())
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
