//! Mock experiences API for the Hotel Explorer.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /api/experiences`** -- the static experience catalog, served
//!   verbatim after a simulated network latency (200 ms by default)
//! - **`GET /api/health`** -- an undelayed liveness probe
//! - **`GET /`** -- a minimal HTML status page
//!
//! # Architecture
//!
//! The catalog is loaded and validated once at startup into an immutable
//! [`AppState`] shared through an [`Arc`](std::sync::Arc). Handlers never
//! write, so no locking is needed.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use config::{ConfigError, ExplorerConfig};
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
