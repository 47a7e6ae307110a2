//! REST endpoint handlers for the mock API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/experiences` | Full experience catalog, after the simulated latency |
//! | `GET` | `/api/health` | Liveness probe, no delay |

use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse};
use axum::Json;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing catalog size and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let internal = state.internal_count;
    let external = state.external_count;
    let latency_ms = state.latency.as_millis();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Hotel Explorer API</title>
    <style>
        body {{
            background: #f8fafc;
            color: #1e3a8a;
            font-family: system-ui, sans-serif;
            padding: 2rem;
            max-width: 720px;
            margin: 0 auto;
        }}
        .metric {{
            display: inline-block;
            background: #ffffff;
            border: 1px solid #cbd5e1;
            border-radius: 8px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #64748b; font-size: 0.85rem; }}
        .metric .value {{ font-size: 1.5rem; font-weight: bold; }}
        li::before {{ content: "GET "; color: #16a34a; font-weight: bold; }}
        ul {{ list-style: none; padding: 0; }}
    </style>
</head>
<body>
    <h1>Hotel Explorer API</h1>
    <div>
        <div class="metric">
            <div class="label">Internal experiences</div>
            <div class="value">{internal}</div>
        </div>
        <div class="metric">
            <div class="label">External experiences</div>
            <div class="value">{external}</div>
        </div>
        <div class="metric">
            <div class="label">Simulated latency</div>
            <div class="value">{latency_ms} ms</div>
        </div>
    </div>
    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/api/experiences">/api/experiences</a> -- Experience catalog</li>
        <li><a href="/api/health">/api/health</a> -- Liveness probe</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /api/experiences -- catalog
// ---------------------------------------------------------------------------

/// Return the catalog document verbatim after the configured latency.
///
/// Always succeeds; there is no error response shape for this endpoint.
pub async fn get_experiences(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tokio::time::sleep(state.latency).await;
    debug!(
        internal = state.internal_count,
        external = state.external_count,
        "Serving experience catalog"
    );
    Json(state.catalog.clone())
}

// ---------------------------------------------------------------------------
// GET /api/health -- liveness
// ---------------------------------------------------------------------------

/// Report that the server is up.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// JSON 404 for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
