//! In-memory mock of the cafe backend
//!
//! Implements every REST path the front desk consumes, with the
//! invariants the real backend enforces server-side: delete guards,
//! billed-order immutability, and the credit-ledger arithmetic. Test
//! infrastructure standing in for the external collaborator, not a
//! production server.

pub mod api;
pub mod auth;
pub mod error;
pub mod state;

pub use state::AppState;

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running mock backend, shut down on drop
pub struct MockServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Spawn on an ephemeral local port
    pub async fn spawn() -> std::io::Result<MockServer> {
        Self::spawn_with_secret("altia-mock-secret").await
    }

    /// Spawn with an explicit JWT secret
    pub async fn spawn_with_secret(secret: &str) -> std::io::Result<MockServer> {
        let state = AppState::new(secret);
        let router = api::router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("mock backend error: {e}");
            }
        });

        tracing::info!("mock backend listening on {addr}");
        Ok(MockServer { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for a client pointed at this server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
