//! Model API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::WebApiConfig;

/// USEEIO API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model id, e.g. `USEEIO` or `USEEIOv2.0`
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Optional key sent as `x-api-key`
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Adapter configuration for these settings
    pub fn web_api_config(&self) -> WebApiConfig {
        let config = WebApiConfig::new(&self.endpoint, &self.model_id).with_timeout(self.timeout());
        match &self.api_key {
            Some(key) if !key.is_empty() => config.with_api_key(key.clone()),
            _ => config,
        }
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint.trim().is_empty() {
            return Err(ValidationError::MissingRequired("API__ENDPOINT"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidEndpoint);
        }
        if self.model_id.trim().is_empty() || self.model_id.contains('/') {
            return Err(ValidationError::InvalidModelId);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model_id: default_model_id(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://smmtool.app.cloud.gov/api".to_string()
}

fn default_model_id() -> String {
    "USEEIO".to_string()
}

fn default_timeout() -> u64 {
    30
}
