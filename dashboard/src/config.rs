//! Configuration management for the Hatchery Dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with HATCHERY_ prefix
//! 4. `VITE_API_URL`, which wins over every other backend URL source

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend connection
    pub api: ApiConfig,

    /// Editable-grid behaviour
    pub grid: GridConfig,

    /// Flock cycle thresholds
    pub cycle: CycleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend root, without the `/api` suffix
    pub base_url: String,

    /// Bearer token attached to every request
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct GridConfig {
    /// How long a saved cell shows its success mark
    pub success_clear_ms: u64,

    /// How long a failed cell shows its error mark
    pub error_clear_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CycleConfig {
    /// Age (weeks) from which a flock counts as producing
    pub producing_from_week: i32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("HATCHERY_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::build(&environment, std::env::var("VITE_API_URL").ok())
    }

    /// Build the layered configuration for `environment`
    pub fn build(environment: &str, api_url_override: Option<String>) -> Result<Self, ConfigError> {
        let api_url_override = api_url_override.filter(|url| !url.trim().is_empty());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("api.base_url", DEFAULT_API_URL)?
            .set_default("grid.success_clear_ms", 1000)?
            .set_default("grid.error_clear_ms", 2000)?
            .set_default("cycle.producing_from_week", shared::DEFAULT_PRODUCING_AGE)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (HATCHERY prefix)
            .add_source(
                Environment::with_prefix("HATCHERY")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", api_url_override)?
            .build()?;

        config.try_deserialize()
    }

    /// Configuration pointing at `base_url` with every other value defaulted
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            environment: "test".to_string(),
            api: ApiConfig {
                base_url: base_url.to_string(),
                token: None,
                timeout_secs: None,
            },
            grid: GridConfig::default(),
            cycle: CycleConfig::default(),
        }
    }
}

impl GridConfig {
    pub fn success_clear(&self) -> Duration {
        Duration::from_millis(self.success_clear_ms)
    }

    pub fn error_clear(&self) -> Duration {
        Duration::from_millis(self.error_clear_ms)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            success_clear_ms: 1000,
            error_clear_ms: 2000,
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            producing_from_week: shared::DEFAULT_PRODUCING_AGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::build("unit-test", None).unwrap();
        assert_eq!(config.environment, "unit-test");
        assert_eq!(config.grid.success_clear(), Duration::from_millis(1000));
        assert_eq!(config.grid.error_clear(), Duration::from_millis(2000));
        assert_eq!(config.cycle.producing_from_week, 24);
    }

    #[test]
    fn test_vite_override_wins() {
        let config = Config::build("unit-test", Some("http://backend:9000".to_string())).unwrap();
        assert_eq!(config.api.base_url, "http://backend:9000");

        let blank = Config::build("unit-test", Some("  ".to_string())).unwrap();
        assert_ne!(blank.api.base_url, "  ");
    }
}
