//! HTTP server for the process advisor (axum).
//!
//! Routes: `POST /api/analyze` runs one analysis, `GET /` is a health check. CORS allows any
//! origin on every route so an independently hosted front end can call the API.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`router`], [`build_service`].

mod app;
mod provider;
mod response;

use std::future::Future;
use std::sync::Arc;

use advisor::AnalysisService;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use app::{router, AppState, HealthResponse, SERVICE_NAME};
pub use provider::{analysis_options, build_client, build_service};
pub use response::{error_response, status_for, ApiError, ErrorBody};

/// Runs the server on an existing listener until `shutdown` resolves. Used by tests
/// (bind to 127.0.0.1:0, then pass the listener).
pub async fn run_serve_on_listener<F>(
    listener: TcpListener,
    service: Arc<AnalysisService>,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(
        provider_ready = service.is_ready(),
        "process advisor listening on http://{}", addr
    );
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

/// Binds `addr` (e.g. `0.0.0.0:5000`) and serves until Ctrl-C.
pub async fn run_serve(
    addr: &str,
    service: Arc<AnalysisService>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, service, shutdown_signal()).await
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
