//! Glean Server
//!
//! HTTP front end for the analysis pipeline. Builds the backend, store and
//! analyzer once from configuration and serves them through axum.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::AppConfig;
use glean_analyzer::{Analyzer, AnalyzerError};
use glean_llm::{Backend, LlmError};
use glean_store::{SqliteStore, StoreError};
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Backend construction error
    #[error("Backend error: {0}")]
    Backend(#[from] LlmError),

    /// Store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Analyzer construction error
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the shared application state from a validated configuration
pub fn build_state(config: &AppConfig) -> Result<AppState, ServerError> {
    config.validate()?;

    let backend = Backend::from_config(&config.generation)?;
    let store = SqliteStore::new(&config.store.path)?;
    info!("Store opened with {} records", store.count()?);
    let analyzer = Analyzer::new(backend, store, config.analysis.clone())?;

    Ok(AppState {
        analyzer: Arc::new(analyzer),
        locale: config.default_locale.clone(),
    })
}

/// Start the HTTP server
///
/// Builds the pipeline from `config` and serves until the listener fails.
pub async fn start_server(config: AppConfig) -> Result<(), ServerError> {
    info!("Starting Glean server");
    info!("Bind address: {}", config.bind_addr());
    info!("Store path: {}", config.store.path);
    info!("Default locale: {}", config.default_locale);

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
