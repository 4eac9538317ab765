//! Model Reader Port - Interface to an input-output model.
//!
//! This port abstracts the data-access side of a model: metadata (sectors,
//! indicators, demand vectors), matrices by name, and calculations. The
//! analysis services only depend on this contract and never know whether
//! a call is served from a cache or triggers a network round trip.
//!
//! # Design
//!
//! - Every call is a suspension point; failures propagate as `ModelError`
//! - No retries inside the analysis services
//! - Matrices are shared as `Arc<Matrix>` so adapters can cache them
//! - Derived views (`is_multi_regional`, `single_region_sectors`,
//!   `find_demand`, `total_results`) have default implementations built on
//!   the primitive calls; adapters may override them with cached versions

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{
    has_multiple_regions, CalculationResult, CalculationSetup, DemandEntry, DemandInfo,
    DemandSpec, Indicator, Matrix, MatrixName, Perspective, Sector, SingleRegionSectors,
};

/// Port for reading an input-output model.
#[async_trait]
pub trait ModelReader: Send + Sync {
    /// All sectors of the model (region-specific in multi-regional models),
    /// in stable order.
    async fn sectors(&self) -> Result<Vec<Sector>, ModelError>;

    /// All indicators of the model, in stable order.
    async fn indicators(&self) -> Result<Vec<Indicator>, ModelError>;

    /// The matrix with the given name.
    async fn matrix(&self, name: MatrixName) -> Result<Arc<Matrix>, ModelError>;

    /// Metadata of all demand vectors of the model.
    async fn demands(&self) -> Result<Vec<DemandInfo>, ModelError>;

    /// The entries of the demand vector with the given id.
    async fn demand(&self, id: &str) -> Result<Vec<DemandEntry>, ModelError>;

    /// Runs a calculation.
    async fn calculate(&self, setup: &CalculationSetup) -> Result<CalculationResult, ModelError>;

    /// Returns true if a sector code occurs in more than one region.
    async fn is_multi_regional(&self) -> Result<bool, ModelError> {
        let sectors = self.sectors().await?;
        Ok(has_multiple_regions(&sectors))
    }

    /// Canonical single-region sectors with a `code -> index` map.
    async fn single_region_sectors(&self) -> Result<SingleRegionSectors, ModelError> {
        let sectors = self.sectors().await?;
        Ok(SingleRegionSectors::from_sectors(&sectors))
    }

    /// Finds the id of the demand vector matching the given spec.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if no demand vector matches.
    async fn find_demand(&self, spec: &DemandSpec) -> Result<String, ModelError> {
        let demands = self.demands().await?;
        spec.find(&demands)
            .map(|info| info.id.clone())
            .ok_or_else(|| ModelError::not_found(format!("no demand vector matches {:?}", spec)))
    }

    /// Per-indicator totals of the given demand scenario, used as
    /// normalization denominators.
    async fn total_results(&self, demand_id: &str) -> Result<Vec<f64>, ModelError> {
        let demand = self.demand(demand_id).await?;
        let result = self
            .calculate(&CalculationSetup::new(Perspective::Final, demand))
            .await?;
        Ok(result.totals)
    }
}

/// Errors raised by model adapters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Network error during a request.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("request {path} failed with status {status}")]
    Status {
        /// Requested path.
        path: String,
        /// HTTP status code.
        status: u16,
    },

    /// Failed to parse a response.
    #[error("failed to parse response for {path}: {message}")]
    Parse {
        /// Requested path.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The model data is inconsistent.
    #[error("invalid model data: {0}")]
    InvalidData(String),
}

impl ModelError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a status error.
    pub fn status(path: impl Into<String>, status: u16) -> Self {
        Self::Status {
            path: path.into(),
            status,
        }
    }

    /// Creates a parse error.
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}
