//! Listener lifecycle: bind, serve, shut down.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// Bind the listener described by `config`.
pub async fn bind(config: &GatewayConfig) -> Result<TcpListener, GatewayError> {
    config.validate().map_err(GatewayError::Config)?;
    let addr = config.bind_addr();
    TcpListener::bind(&addr)
        .await
        .map_err(|source| GatewayError::Bind { addr, source })
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), GatewayError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!(addr = %addr, "Server stopped");
    Ok(())
}
