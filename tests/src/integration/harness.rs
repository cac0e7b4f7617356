//! Servers on ephemeral loopback ports.

use axum::Router;
use dcfs_gateway::{bind, serve, GatewayConfig, GatewayError};
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Gateway config bound to an ephemeral loopback port.
pub fn loopback_config() -> GatewayConfig {
    GatewayConfig {
        address: "127.0.0.1".into(),
        port: 0,
        ..GatewayConfig::default()
    }
}

/// A router served in the background until stopped.
pub struct RunningServer {
    pub addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<(), GatewayError>>,
}

impl RunningServer {
    /// Bind `router` on loopback and serve it in a background task.
    pub async fn start(router: Router) -> Result<Self, GatewayError> {
        let listener = bind(&loopback_config()).await?;
        let addr = listener.local_addr()?;
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(serve(listener, router, async {
            let _ = stopped.await;
        }));
        Ok(Self { addr, stop, task })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Signal shutdown and wait for the server to drain.
    pub async fn stop(self) -> Result<(), GatewayError> {
        let _ = self.stop.send(());
        self.task
            .await
            .map_err(|e| GatewayError::Io(std::io::Error::other(e)))?
    }
}

/// A loopback address nothing is listening on.
pub async fn closed_port() -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    listener.local_addr()
}
