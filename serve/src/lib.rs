//! HTTP server for Nebula (axum).
//!
//! Serves the project endpoints under `/nebula_image_manager`: `GET list`, `GET load`,
//! `POST save`. Handlers are thin adapters over an injected [`nebula::ProjectStore`].
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`router`].

mod app;
mod error;
mod handlers;

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::info;

use nebula::ProjectStore;

pub use app::{router, AppState, ROUTE_PREFIX};
pub use error::ApiError;

/// Serves on an existing listener. Used by tests (bind to 127.0.0.1:0 then pass the listener).
///
/// When `shutdown` is given, the server stops gracefully once it fires (or its sender is dropped).
pub async fn run_serve_on_listener(
    listener: TcpListener,
    store: Arc<dyn ProjectStore>,
    shutdown: Option<oneshot::Receiver<()>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!("HTTP server listening on http://{}{}", addr, ROUTE_PREFIX);

    let app = router(store);
    match shutdown {
        Some(rx) => {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await?;
            info!("shutdown requested, server stopped");
        }
        None => axum::serve(listener, app).await?,
    }
    Ok(())
}

/// Binds `addr` and serves until `shutdown` fires (or forever when `None`).
pub async fn run_serve(
    addr: &str,
    store: Arc<dyn ProjectStore>,
    shutdown: Option<oneshot::Receiver<()>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, store, shutdown).await
}
