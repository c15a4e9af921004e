//! API route definitions

use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Create the application router
///
/// Cross-origin requests are accepted from any origin since the caller is a
/// separately hosted front-end.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/predict",
            post(handlers::predict).fallback(handlers::handle_405),
        )
        .fallback(handlers::handle_404)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
