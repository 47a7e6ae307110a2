//! Error types for the mock API binary.

use explorer_api::{ApiError, ConfigError, ServerError};

/// Top-level error for the mock API binary.
///
/// Each variant wraps the failure of one startup step so `main` can
/// propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The catalog could not be loaded or validated.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying API error.
        #[from]
        source: ApiError,
    },

    /// The HTTP listener failed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: ServerError,
    },
}
