//! Configuration management for AgroSage
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGROSAGE_ prefix
//!
//! The bare `API_KEY` variable is also accepted for the Gemini credential.

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::TemperatureUnit;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Gemini API configuration
    pub gemini: GeminiConfig,

    /// Recommendation pipeline configuration
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// Gemini API key; requests fail with a configuration error without it
    pub api_key: Option<String>,

    /// Base URL of the Generative Language API
    pub base_url: String,

    /// Transport timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendationConfig {
    /// Unit the submitted temperature readings are expressed in
    pub temperature_unit: TemperatureUnit,
}

impl GeminiConfig {
    /// The configured key, ignoring blank values
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGROSAGE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let mut builder = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("gemini.base_url", crate::external::gemini::DEFAULT_BASE_URL)?
            .set_default("gemini.timeout_secs", 60)?
            .set_default("recommendation.temperature_unit", "fahrenheit")?;

        if let Ok(api_key) = std::env::var("API_KEY") {
            builder = builder.set_default("gemini.api_key", api_key)?;
        }

        let config = builder
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGROSAGE_ prefix)
            .add_source(
                Environment::with_prefix("AGROSAGE")
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

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: crate::external::gemini::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}
