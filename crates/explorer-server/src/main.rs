//! Mock experiences API binary for the Hotel Explorer.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `explorer-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Load and validate the experience catalog
//! 4. Serve until Ctrl-C

mod error;

use std::path::Path;
use std::sync::Arc;

use explorer_api::{AppState, ExplorerConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

const CONFIG_PATH: &str = "explorer-config.yaml";

/// Application entry point for the mock API.
///
/// # Errors
///
/// Returns an error if configuration, catalog loading, or the listener
/// fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so remember where it
    //    came from and report it afterwards.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        source = if from_file { CONFIG_PATH } else { "defaults" },
        host = config.server.host,
        port = config.server.port,
        latency_ms = config.api.latency_ms,
        "Configuration loaded"
    );

    // 3. Load the catalog.
    let state = AppState::load(config.api.catalog_path.as_deref(), config.api.latency())?;
    info!(
        internal = state.internal_count,
        external = state.external_count,
        "Experience catalog ready"
    );

    // 4. Serve.
    start_server(&config.server, Arc::new(state)).await?;
    info!("explorer-server stopped");
    Ok(())
}

/// Load configuration from `explorer-config.yaml`, falling back to
/// defaults (plus environment overrides) when the file is absent.
fn load_config() -> Result<(ExplorerConfig, bool), AppError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok((ExplorerConfig::from_file(config_path)?, true))
    } else {
        Ok((ExplorerConfig::parse("")?, false))
    }
}
