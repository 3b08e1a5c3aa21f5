//! HTTP surface of the kiosk

pub mod error;
pub mod handlers;
pub mod state;

use crate::errors::AppResult;
use axum::{
    Router,
    routing::{get, post},
};
use state::AppState;
use tokio::net::TcpListener;
use tracing::info;

/// Create the router for the kiosk
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/checkin", post(handlers::checkin))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Kiosk listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Kiosk stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
