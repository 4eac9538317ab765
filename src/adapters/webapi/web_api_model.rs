//! Web API Model - Implementation of ModelReader for the USEEIO REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = WebApiConfig::new("https://smmtool.app.cloud.gov/api", "USEEIO")
//!     .with_api_key(key)
//!     .with_timeout(Duration::from_secs(30));
//!
//! let model = WebApiModel::new(config);
//! ```
//!
//! # Caching
//!
//! Model metadata, demand vectors and matrices do not change for a model
//! version, so every successful response is kept for the lifetime of the
//! adapter. Failed requests are not cached and are retried on the next
//! call. Calculations are never cached.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    CalculationResult, CalculationSetup, DemandEntry, DemandInfo, Indicator, Matrix, MatrixName,
    Sector,
};
use crate::ports::{ModelError, ModelReader};

/// Default endpoint of the public USEEIO API.
pub const DEFAULT_ENDPOINT: &str = "https://smmtool.app.cloud.gov/api";

/// Default model id.
pub const DEFAULT_MODEL_ID: &str = "USEEIO";

/// Configuration for the web API adapter.
#[derive(Debug, Clone)]
pub struct WebApiConfig {
    /// Base URL of the API, without trailing slash.
    pub endpoint: String,
    /// Model id used as the first path segment.
    pub model_id: String,
    /// Optional key sent in the `x-api-key` header.
    api_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl WebApiConfig {
    /// Creates a configuration for the given endpoint and model.
    pub fn new(endpoint: impl Into<String>, model_id: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model_id: model_id.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }

    /// Full URL of a model resource, e.g. `{endpoint}/{model}/sectors`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint,
            self.model_id,
            path.trim_start_matches('/')
        )
    }
}

impl Default for WebApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL_ID)
    }
}

#[derive(Default)]
struct ResponseCache {
    sectors: Option<Vec<Sector>>,
    indicators: Option<Vec<Indicator>>,
    demands: Option<Vec<DemandInfo>>,
    demand_entries: HashMap<String, Vec<DemandEntry>>,
    matrices: HashMap<MatrixName, Arc<Matrix>>,
}

/// Model backed by the USEEIO REST API.
pub struct WebApiModel {
    config: WebApiConfig,
    client: Client,
    cache: Arc<RwLock<ResponseCache>>,
}

impl WebApiModel {
    /// Creates a new adapter. No request is made until data is needed.
    pub fn new(config: WebApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            cache: Arc::new(RwLock::new(ResponseCache::default())),
        }
    }

    /// The adapter configuration.
    pub fn config(&self) -> &WebApiConfig {
        &self.config
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Content-Type", "application/json;charset=UTF-8");
        match self.config.api_key() {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ModelError> {
        let response = self.with_headers(request).send().await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "Model API request failed");
            if e.is_timeout() {
                ModelError::network(format!("request {} timed out", path))
            } else {
                ModelError::network(format!("request {} failed: {}", path, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path = %path, status = status.as_u16(), "Model API returned error status");
            return Err(ModelError::status(path, status.as_u16()));
        }
        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ModelError> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "Failed to parse model API response");
            ModelError::parse(path, e.to_string())
        })
    }

    /// Fetches and deserializes `GET {endpoint}/{model}/{path}`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ModelError> {
        let url = self.config.url(path);
        tracing::debug!(url = %url, "Fetching from model API");
        let response = self.send(path, self.client.get(&url)).await?;
        Self::parse(path, response).await
    }
}

#[async_trait]
impl ModelReader for WebApiModel {
    async fn sectors(&self) -> Result<Vec<Sector>, ModelError> {
        if let Some(sectors) = &self.cache.read().await.sectors {
            return Ok(sectors.clone());
        }
        let mut sectors: Vec<Sector> = self.get_json("sectors").await?;
        sectors.sort_by_key(|s| s.index);
        tracing::debug!(count = sectors.len(), "Fetched sectors");
        self.cache.write().await.sectors = Some(sectors.clone());
        Ok(sectors)
    }

    async fn indicators(&self) -> Result<Vec<Indicator>, ModelError> {
        if let Some(indicators) = &self.cache.read().await.indicators {
            return Ok(indicators.clone());
        }
        let mut indicators: Vec<Indicator> = self.get_json("indicators").await?;
        indicators.sort_by_key(|i| i.index);
        tracing::debug!(count = indicators.len(), "Fetched indicators");
        self.cache.write().await.indicators = Some(indicators.clone());
        Ok(indicators)
    }

    async fn matrix(&self, name: MatrixName) -> Result<Arc<Matrix>, ModelError> {
        if let Some(matrix) = self.cache.read().await.matrices.get(&name) {
            return Ok(Arc::clone(matrix));
        }
        let matrix: Matrix = self.get_json(&format!("matrix/{}", name)).await?;
        tracing::debug!(matrix = %name, rows = matrix.rows(), cols = matrix.cols(), "Fetched matrix");
        let matrix = Arc::new(matrix);
        self.cache
            .write()
            .await
            .matrices
            .insert(name, Arc::clone(&matrix));
        Ok(matrix)
    }

    async fn demands(&self) -> Result<Vec<DemandInfo>, ModelError> {
        if let Some(demands) = &self.cache.read().await.demands {
            return Ok(demands.clone());
        }
        let demands: Vec<DemandInfo> = self.get_json("demands").await?;
        self.cache.write().await.demands = Some(demands.clone());
        Ok(demands)
    }

    async fn demand(&self, id: &str) -> Result<Vec<DemandEntry>, ModelError> {
        if let Some(entries) = self.cache.read().await.demand_entries.get(id) {
            return Ok(entries.clone());
        }
        let entries: Vec<DemandEntry> = self.get_json(&format!("demands/{}", id)).await?;
        self.cache
            .write()
            .await
            .demand_entries
            .insert(id.to_string(), entries.clone());
        Ok(entries)
    }

    async fn calculate(&self, setup: &CalculationSetup) -> Result<CalculationResult, ModelError> {
        let path = "calculate";
        let url = self.config.url(path);
        tracing::debug!(
            url = %url,
            perspective = %setup.perspective,
            entries = setup.demand.len(),
            "Requesting calculation"
        );
        let response = self.send(path, self.client.post(&url).json(setup)).await?;
        let result: CalculationResult = Self::parse(path, response).await?;
        result.check_shape().map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Model API returned malformed result");
            ModelError::invalid_data(e.to_string())
        })?;
        Ok(result)
    }
}
