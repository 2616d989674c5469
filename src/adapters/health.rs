//! Liveness endpoint for the hosting platform.
//!
//! Runs as its own tokio task and shares no state with the polling loop:
//! bind → spawn background task → return handle with shutdown channel.

use crate::utils::error::Result;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn health_router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(check))
}

async fn home() -> &'static str {
    "Bot Running!"
}

async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handle to a running health server.
pub struct HealthServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl HealthServer {
    /// The bound address; differs from the requested one when port 0 was used.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Health server shutdown signal sent");
        }
    }

    /// Signals shutdown and waits for the server task to finish.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Err(e) = self.task.await {
            tracing::error!("Health server task failed: {}", e);
        }
    }
}

pub async fn start_health_server(addr: SocketAddr) -> Result<HealthServer> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        tracing::info!(%addr, "🩺 Health server started");

        if let Err(e) = axum::serve(listener, health_router())
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Health server error: {}", e);
        }

        tracing::info!("Health server stopped");
    });

    Ok(HealthServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
