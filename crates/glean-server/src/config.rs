//! Configuration file parsing for the server.
//!
//! Loads settings from TOML, then applies `GLEAN_*` environment overrides.
//! Every section is optional; missing keys take their defaults.

use glean_analyzer::AnalyzerConfig;
use glean_llm::{GenerationConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Backend selector override
pub const ENV_PROVIDER: &str = "GLEAN_LLM_PROVIDER";
/// Ollama base URL override
pub const ENV_OLLAMA_BASE_URL: &str = "GLEAN_OLLAMA_BASE_URL";
/// Ollama model override
pub const ENV_OLLAMA_MODEL: &str = "GLEAN_OLLAMA_MODEL";
/// Default locale override
pub const ENV_DEFAULT_LOCALE: &str = "GLEAN_DEFAULT_LOCALE";
/// Database path override
pub const ENV_DB_PATH: &str = "GLEAN_DB_PATH";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
        }
    }
}

/// Record store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database path; `:memory:` keeps records for the process lifetime only
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "glean.db".to_string(),
        }
    }
}

/// Full server configuration, read once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Locale reported to clients
    pub default_locale: String,

    /// HTTP listener
    pub server: ListenConfig,

    /// Generation backend
    pub generation: GenerationConfig,

    /// Pipeline tuning
    pub analysis: AnalyzerConfig,

    /// Persistence
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            server: ListenConfig::default(),
            generation: GenerationConfig::default(),
            analysis: AnalyzerConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Apply `GLEAN_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unset or blank values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(provider) = get(ENV_PROVIDER) {
            self.generation.provider = ProviderKind::parse(&provider).ok_or_else(|| {
                ConfigError::Invalid(format!("unknown provider '{}' in {}", provider, ENV_PROVIDER))
            })?;
        }
        if let Some(url) = get(ENV_OLLAMA_BASE_URL) {
            self.generation.endpoint = url;
        }
        if let Some(model) = get(ENV_OLLAMA_MODEL) {
            self.generation.model = model;
        }
        if let Some(locale) = get(ENV_DEFAULT_LOCALE) {
            self.default_locale = locale;
        }
        if let Some(path) = get(ENV_DB_PATH) {
            self.store.path = path;
        }
        Ok(())
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_locale.trim().is_empty() {
            return Err(ConfigError::Invalid("default_locale cannot be empty".to_string()));
        }
        if self.store.path.trim().is_empty() {
            return Err(ConfigError::Invalid("store.path cannot be empty".to_string()));
        }
        self.generation
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("generation: {}", e)))?;
        self.analysis
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("analysis: {}", e)))?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
    }
}
