//! CalculateHeatmapHandler - Query handler producing the heatmap result of a
//! result view.

use std::sync::Arc;

use tracing::debug;

use super::ResultConfig;
use crate::domain::analysis::HeatmapResult;
use crate::domain::foundation::numeric::ones;
use crate::domain::foundation::{CalculationResult, CalculationSetup, MatrixName, Perspective};
use crate::ports::{ModelError, ModelReader};

/// Handler computing the [`HeatmapResult`] for a [`ResultConfig`].
pub struct CalculateHeatmapHandler {
    model: Arc<dyn ModelReader>,
}

impl CalculateHeatmapHandler {
    pub fn new(model: Arc<dyn ModelReader>) -> Self {
        Self { model }
    }

    /// Without an analysis type the `D` (direct perspective) or `U` matrix
    /// is shown as is, with totals of one. Otherwise the matching demand is
    /// calculated with the configured perspective.
    pub async fn handle(&self, config: &ResultConfig) -> Result<HeatmapResult, ModelError> {
        let result = match config.analysis {
            None => self.matrix_result(config.perspective).await?,
            Some(_) => {
                let demand_id = self.model.find_demand(&config.demand_spec()).await?;
                let demand = self.model.demand(&demand_id).await?;
                debug!(
                    demand = %demand_id,
                    perspective = %config.perspective,
                    entries = demand.len(),
                    "Calculating heatmap result"
                );
                self.model
                    .calculate(&CalculationSetup::new(config.perspective, demand))
                    .await?
            }
        };
        HeatmapResult::from_model(self.model.as_ref(), result).await
    }

    async fn matrix_result(&self, perspective: Perspective) -> Result<CalculationResult, ModelError> {
        let name = if perspective == Perspective::Direct {
            MatrixName::D
        } else {
            MatrixName::U
        };
        let matrix = self.model.matrix(name).await?;
        let indicators = self.model.indicators().await?;
        let sectors = self.model.sectors().await?;
        debug!(matrix = %name, "Wrapping matrix as heatmap result");
        Ok(CalculationResult {
            data: matrix.to_rows(),
            totals: ones(indicators.len()),
            indicators: indicators.into_iter().map(|i| i.code).collect(),
            sectors: sectors.into_iter().map(|s| s.id).collect(),
        })
    }
}
