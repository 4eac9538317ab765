//! Region Aggregator - Collapses a multi-regional sector axis to sector codes.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::foundation::{CalculationResult, DemandEntry, Sector, SingleRegionSectors};
use crate::ports::{ModelError, ModelReader};

/// Region aggregation functions.
pub struct RegionAggregator;

impl RegionAggregator {
    /// Aggregates the result of a multi-regional model so that the columns
    /// of the same sector code in different regions are summed up to a
    /// single column.
    ///
    /// The returned sectors describe an artificially aggregated view and
    /// must **never** be used for API requests. For single-region models
    /// the model sectors and the unchanged result are returned.
    ///
    /// # Errors
    ///
    /// Propagates failures of the model port.
    pub async fn aggregate_by_region(
        result: CalculationResult,
        model: &dyn ModelReader,
    ) -> Result<(Vec<Sector>, CalculationResult), ModelError> {
        let sectors = model.sectors().await?;
        if !model.is_multi_regional().await? {
            return Ok((sectors, result));
        }
        let view = model.single_region_sectors().await?;
        let aggregated = Self::aggregate(&result, &sectors, &view);
        debug!(
            regional_sectors = sectors.len(),
            aggregated_sectors = view.sectors.len(),
            "Aggregated result by region"
        );
        Ok((view.sectors, aggregated))
    }

    /// Sums the result columns of `sectors` into the columns of the
    /// single-region view.
    ///
    /// # Edge Cases
    /// - Sector code without aggregated index: dropped
    /// - Sector index outside a result row: contributes nothing
    /// - Totals: copied, they do not depend on the sector axis
    pub fn aggregate(
        result: &CalculationResult,
        sectors: &[Sector],
        view: &SingleRegionSectors,
    ) -> CalculationResult {
        let width = view.sectors.len();
        let data = result
            .data
            .iter()
            .map(|row| {
                let mut aggregated = vec![0.0; width];
                for sector in sectors {
                    let Some(j) = view.index_of(&sector.code) else {
                        continue;
                    };
                    if let (Some(target), Some(value)) =
                        (aggregated.get_mut(j), row.get(sector.index))
                    {
                        *target += value;
                    }
                }
                aggregated
            })
            .collect();

        CalculationResult {
            indicators: result.indicators.clone(),
            sectors: view.sectors.iter().map(|s| s.id.clone()).collect(),
            data,
            totals: result.totals.clone(),
        }
    }

    /// Sums demand amounts of region-specific sectors per sector code.
    ///
    /// Entries whose sector id is unknown or whose amount is zero are
    /// skipped.
    pub fn aggregate_demand_by_code(
        sectors: &[Sector],
        entries: &[DemandEntry],
    ) -> HashMap<String, f64> {
        let amounts: HashMap<&str, f64> = entries
            .iter()
            .map(|e| (e.sector.as_str(), e.amount))
            .collect();

        let mut by_code = HashMap::new();
        for sector in sectors {
            let amount = amounts.get(sector.id.as_str()).copied().unwrap_or(0.0);
            if amount == 0.0 {
                continue;
            }
            *by_code.entry(sector.code.clone()).or_insert(0.0) += amount;
        }
        by_code
    }

    /// Number of distinct sector codes, i.e. the row count of an
    /// aggregated view.
    pub fn unique_sector_count(sectors: &[Sector]) -> usize {
        sectors
            .iter()
            .map(|s| s.code.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}
