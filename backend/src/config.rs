//! Configuration management for the NovaSphere bookkeeping server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with NOVA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Ledger persistence configuration
    pub storage: StorageConfig,

    /// Generative insight configuration
    pub insight: InsightConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory holding one JSON file per slot
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InsightConfig {
    /// Generative language API base URL
    pub api_endpoint: String,

    /// Name of the environment variable holding the API key.
    /// Read on every request, never stored in config.
    pub api_key_env: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("NOVA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.backend", "file")?
            .set_default("storage.data_dir", "data")?
            .set_default(
                "insight.api_endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("insight.api_key_env", "API_KEY")?
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // NOVA__SERVER__PORT=8080 style overrides
            .add_source(
                Environment::with_prefix("NOVA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: "data".to_string(),
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "API_KEY".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            insight: InsightConfig::default(),
        }
    }
}
