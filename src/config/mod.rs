//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `EEIO` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use eeio_results::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {} at {}", config.api.model_id, config.api.endpoint);
//! ```

mod api;
mod error;
mod logging;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

use crate::application::ResultConfig;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration against the public USEEIO API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Model API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Result view settings
    #[serde(default)]
    pub results: ResultConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `EEIO` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `EEIO__API__MODEL_ID=USEEIOv2.0` -> `api.model_id = "USEEIOv2.0"`
    /// - `EEIO__RESULTS__PERSPECTIVE=final` -> `results.perspective = Final`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EEIO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("results.indicators")
                    .with_list_parse_key("results.sectors"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DemandType, Perspective};
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 8] = [
        "EEIO__API__ENDPOINT",
        "EEIO__API__MODEL_ID",
        "EEIO__API__TIMEOUT_SECS",
        "EEIO__LOGGING__JSON",
        "EEIO__RESULTS__PERSPECTIVE",
        "EEIO__RESULTS__ANALYSIS",
        "EEIO__RESULTS__COUNT",
        "EEIO__RESULTS__INDICATORS",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.api.model_id, "USEEIO");
        assert_eq!(config.logging.filter, "info,eeio_results=debug");
        assert_eq!(config.results, ResultConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("EEIO__API__ENDPOINT", "http://localhost:8080/api");
        env::set_var("EEIO__API__MODEL_ID", "USEEIOv2.0");
        env::set_var("EEIO__API__TIMEOUT_SECS", "10");
        env::set_var("EEIO__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.endpoint, "http://localhost:8080/api");
        assert_eq!(config.api.model_id, "USEEIOv2.0");
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_result_settings() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("EEIO__RESULTS__PERSPECTIVE", "final");
        env::set_var("EEIO__RESULTS__ANALYSIS", "Consumption");
        env::set_var("EEIO__RESULTS__COUNT", "10");
        env::set_var("EEIO__RESULTS__INDICATORS", "GHG,WATR");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.results.perspective, Perspective::Final);
        assert_eq!(config.results.analysis, Some(DemandType::Consumption));
        assert_eq!(config.results.count, 10);
        assert_eq!(config.results.indicators, vec!["GHG", "WATR"]);
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("EEIO__API__ENDPOINT", "localhost");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(config.validate(), Err(ValidationError::InvalidEndpoint)));
    }
}
