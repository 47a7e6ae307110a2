//! Shared application state for the mock API server.
//!
//! [`AppState`] holds the static experience catalog and the simulated
//! latency. The catalog is validated once at startup against
//! [`ExperienceCatalog`] and then served verbatim as the raw JSON value,
//! so the response body is exactly the document on disk.

use std::path::Path;
use std::time::Duration;

use explorer_types::ExperienceCatalog;
use serde_json::Value;

use crate::error::ApiError;

/// Catalog compiled into the binary, served when no path is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../data/experiences.json");

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. Immutable after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The catalog document as served.
    pub catalog: Value,
    /// Number of internal experiences (for the status page).
    pub internal_count: usize,
    /// Number of external experiences (for the status page).
    pub external_count: usize,
    /// Delay applied before answering `GET /api/experiences`.
    pub latency: Duration,
}

impl AppState {
    /// Build state from a catalog JSON document.
    ///
    /// The document must have exactly the two top-level lists
    /// `internalExperiences` and `externalExperiences`.
    pub fn from_json(raw: &str, latency: Duration) -> Result<Self, ApiError> {
        let catalog: Value = serde_json::from_str(raw)?;
        let typed: ExperienceCatalog = serde_json::from_value(catalog.clone())
            .map_err(|e| ApiError::InvalidCatalog(e.to_string()))?;

        Ok(Self {
            catalog,
            internal_count: typed.internal_experiences.len(),
            external_count: typed.external_experiences.len(),
            latency,
        })
    }

    /// Build state from the catalog compiled into the binary.
    pub fn bundled(latency: Duration) -> Result<Self, ApiError> {
        Self::from_json(BUNDLED_CATALOG, latency)
    }

    /// Build state from a catalog file on disk.
    pub fn from_file(path: &Path, latency: Duration) -> Result<Self, ApiError> {
        let raw = std::fs::read_to_string(path)?;
        let state = Self::from_json(&raw, latency)?;
        tracing::info!(
            path = %path.display(),
            internal = state.internal_count,
            external = state.external_count,
            "Catalog loaded"
        );
        Ok(state)
    }

    /// Build state from an optional path, falling back to the bundled
    /// catalog.
    pub fn load(path: Option<&Path>, latency: Duration) -> Result<Self, ApiError> {
        path.map_or_else(|| Self::bundled(latency), |p| Self::from_file(p, latency))
    }
}
