//! Heatmap Result - Region-aggregated, normalized and rankable model result.

use crate::domain::foundation::{CalculationResult, Indicator, Sector};
use crate::ports::{ModelError, ModelReader};

use super::{RankedSector, RankingQuery, RegionAggregator, ResultNormalizer, SectorRanker};

/// A model result prepared for list and heatmap widgets.
///
/// Created once per (model, demand, perspective) combination and never
/// mutated; a new instance is built whenever the inputs change. In
/// multi-regional models the sectors are the synthetic aggregated sectors
/// and must not be used for API requests.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapResult {
    sectors: Vec<Sector>,
    normalizer: ResultNormalizer,
}

impl HeatmapResult {
    /// Aggregates the result by region (if the model is multi-regional)
    /// and computes the normalized and share matrices.
    ///
    /// # Errors
    ///
    /// Propagates failures of the model port; no partial result is kept.
    pub async fn from_model(
        model: &dyn ModelReader,
        result: CalculationResult,
    ) -> Result<Self, ModelError> {
        let (sectors, aggregated) = RegionAggregator::aggregate_by_region(result, model).await?;
        Ok(Self::new(sectors, aggregated))
    }

    /// Creates the heatmap result from sectors matching the result columns.
    pub fn new(sectors: Vec<Sector>, result: CalculationResult) -> Self {
        Self {
            sectors,
            normalizer: ResultNormalizer::new(result),
        }
    }

    /// Sectors of the result columns.
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// The (aggregated) raw result.
    pub fn raw(&self) -> &CalculationResult {
        self.normalizer.raw()
    }

    /// Raw result value for the indicator and sector, `0` when out of range.
    pub fn result(&self, indicator: &Indicator, sector: &Sector) -> f64 {
        self.normalizer.result(indicator, sector)
    }

    /// Share in `[-1, 1]` for the indicator and sector, `0` when out of range.
    pub fn share(&self, indicator: &Indicator, sector: &Sector) -> f64 {
        self.normalizer.share(indicator, sector)
    }

    /// Normalized value for the indicator and sector, `0` when out of range.
    pub fn normalized(&self, indicator: &Indicator, sector: &Sector) -> f64 {
        self.normalizer.normalized(indicator, sector)
    }

    /// Ranks the sectors of this result; see [`SectorRanker::ranked`].
    ///
    /// A negative `count` means no limit.
    pub fn get_ranking(
        &self,
        indicators: &[Indicator],
        count: i64,
        search_term: Option<&str>,
        sort_indicator: Option<&Indicator>,
    ) -> Vec<Sector> {
        SectorRanker::get_ranking(
            &self.normalizer,
            &self.sectors,
            indicators,
            count,
            search_term,
            sort_indicator,
        )
    }

    /// Ranks the sectors of this result together with their rank values.
    pub fn ranked(&self, query: &RankingQuery) -> Vec<RankedSector> {
        SectorRanker::ranked(&self.normalizer, &self.sectors, query)
    }
}
