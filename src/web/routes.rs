use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::web::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Prediction form
        .route("/", get(handlers::index).post(handlers::submit))
        // Liveness
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
