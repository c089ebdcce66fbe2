//! HTTP server for the GitHub login flow.
//!
//! Routes are built in [`transport::create_router`]; handlers and the
//! boundary error mapping live in [`handlers`].

pub mod handlers;
pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::client::GitHubOAuthClient;
use crate::store::UserStore;

/// Login server: an OAuth client plus the store profiles are written to.
pub struct AuthServer {
    client: GitHubOAuthClient,
    store: Arc<dyn UserStore>,
}

impl AuthServer {
    /// Create a new server.
    #[must_use]
    pub fn new(client: GitHubOAuthClient, store: Arc<dyn UserStore>) -> Self {
        Self { client, store }
    }

    /// Serve HTTP on `port` until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error on bind or server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        let router = transport::create_router(self.client, self.store);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for AuthServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServer").field("client", &self.client).finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}
