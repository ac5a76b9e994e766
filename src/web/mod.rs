pub mod handlers;
pub mod render;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, ModelInfo};

use crate::utils::error::{AppError, Result};
use std::net::SocketAddr;

/// 綁定位址並提供表單，直到收到 Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::ServerError {
            message: format!("Failed to bind {}: {}", addr, e),
        })?;
    tracing::info!("🍷 Serving Wine Quality Prediction App on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::ServerError {
            message: e.to_string(),
        })?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
