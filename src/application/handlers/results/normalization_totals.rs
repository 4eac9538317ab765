//! NormalizationTotalsHandler - Indicator totals used to normalize sector
//! profiles.

use std::sync::Arc;

use tracing::debug;

use super::ResultConfig;
use crate::ports::{ModelError, ModelReader};

/// Handler computing normalization totals for a [`ResultConfig`].
pub struct NormalizationTotalsHandler {
    model: Arc<dyn ModelReader>,
}

impl NormalizationTotalsHandler {
    pub fn new(model: Arc<dyn ModelReader>) -> Self {
        Self { model }
    }

    /// Total indicator results of the demand matching the configuration
    /// (Consumption unless an analysis type is set).
    pub async fn handle(&self, config: &ResultConfig) -> Result<Vec<f64>, ModelError> {
        let demand_id = self.model.find_demand(&config.demand_spec()).await?;
        debug!(demand = %demand_id, "Computing normalization totals");
        self.model.total_results(&demand_id).await
    }
}
