//! Axum router construction for the mock API.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled so
//! the front-end dev server can call the API from another origin.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/experiences` -- experience catalog (delayed)
/// - `GET /api/health` -- liveness probe
///
/// Unknown paths get a JSON 404. CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/experiences", get(handlers::get_experiences))
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
