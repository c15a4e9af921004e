//! HTTP server loop

use std::future::Future;
use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use service_config::ServiceConfig;

use crate::routes::create_router;
use crate::state::AppState;

/// Binds the configured address and serves until ctrl+c
pub async fn run(config: &ServiceConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let address = config.bind_address();
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind {}", address))?;

    serve(listener, state, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    listener.set_nonblocking(true)?;
    let address = listener.local_addr()?;
    let model_loaded = state.model_loaded();
    let app = create_router(state);

    info!(
        address = %address,
        model_loaded,
        pid = std::process::id(),
        "Server listening and ready to accept connections"
    );
    info!(url = %format!("http://{}/predict", address), "Prediction endpoint available");

    axum::Server::from_tcp(listener)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install ctrl+c handler; shut down by terminating the process");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server gracefully");
}
