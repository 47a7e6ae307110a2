//! Catalog fetch from the experiences API.
//!
//! One request per page load, no timeout and no retry: re-navigating is
//! the retry mechanism.

use explorer_types::ExperienceCatalog;
use tracing::{debug, info};

/// Path of the catalog endpoint relative to the API base URL.
pub const EXPERIENCES_PATH: &str = "/api/experiences";

/// Errors raised while fetching the catalog.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request failed or the body was not a valid catalog.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),
}

/// HTTP client for the experiences API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The full catalog endpoint URL.
    pub fn experiences_url(&self) -> String {
        format!("{}{EXPERIENCES_PATH}", self.base_url)
    }

    /// Fetch the full catalog.
    pub async fn fetch_catalog(&self) -> Result<ExperienceCatalog, FetchError> {
        let url = self.experiences_url();
        debug!(%url, "Fetching experience catalog");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let catalog: ExperienceCatalog = response.json().await?;
        info!(
            internal = catalog.internal_experiences.len(),
            external = catalog.external_experiences.len(),
            "Experience catalog fetched"
        );
        Ok(catalog)
    }
}
