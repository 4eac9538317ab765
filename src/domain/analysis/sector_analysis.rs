//! Sector Analysis - Contribution partitioning of a single sector's impacts.
//!
//! All results relate to 1 USD output of the analyzed sector. The impacts
//! are split into a part from the sector's direct operations and a part
//! from its supply chain; in multi-regional models the supply chain part
//! is further split by region of origin.

use std::fmt;
use std::sync::Arc;

use futures::try_join;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::domain::foundation::numeric::{reciprocals, safe_div, value_at, zeros};
use crate::domain::foundation::{Indicator, Matrix, MatrixName, Sector};
use crate::ports::{ModelError, ModelReader};

/// Indicator results of a sector split into direct operations and supply
/// chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub totals: Vec<f64>,
    pub direct: Vec<f64>,
    /// `totals - direct`; small negative values from matrix cancellation
    /// are passed through.
    pub upstream: Vec<f64>,
}

/// A [`Partition`] whose supply chain part is split into in-region and
/// out-of-region contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalizedPartition {
    pub totals: Vec<f64>,
    pub direct: Vec<f64>,
    pub upstream_in_region: Vec<f64>,
    pub upstream_out_of_region: Vec<f64>,
}

/// Analysis of one sector against a model and normalization totals.
///
/// The scaling vector (column of `L`) and the purchase vector (column of
/// `A`) are fetched on first use and cached for the lifetime of the
/// instance; they do not depend on the indicators queried later.
pub struct SectorAnalysis {
    sector: Sector,
    model: Arc<dyn ModelReader>,
    normalization_totals: Vec<f64>,
    scaling_vector: OnceCell<Vec<f64>>,
    purchase_vector: OnceCell<Vec<f64>>,
}

impl fmt::Debug for SectorAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectorAnalysis")
            .field("sector", &self.sector.id)
            .field("normalization_totals", &self.normalization_totals.len())
            .field("scaling_vector_loaded", &self.scaling_vector.initialized())
            .field("purchase_vector_loaded", &self.purchase_vector.initialized())
            .finish()
    }
}

impl SectorAnalysis {
    /// Creates a new analysis of the given (region-specific) sector.
    pub fn new(sector: Sector, model: Arc<dyn ModelReader>, normalization_totals: Vec<f64>) -> Self {
        Self {
            sector,
            model,
            normalization_totals,
            scaling_vector: OnceCell::new(),
            purchase_vector: OnceCell::new(),
        }
    }

    /// The analyzed sector.
    pub fn sector(&self) -> &Sector {
        &self.sector
    }

    /// Total output requirements of all sectors per 1 USD final demand of
    /// the analyzed sector (its column of `L`).
    pub async fn scaling_vector(&self) -> Result<&[f64], ModelError> {
        let vector = self
            .scaling_vector
            .get_or_try_init(|| async {
                let l = self.model.matrix(MatrixName::L).await?;
                Ok::<_, ModelError>(l.col(self.sector.index))
            })
            .await?;
        Ok(vector)
    }

    /// Direct purchases of the analyzed sector per 1 USD output (its column
    /// of `A`).
    pub async fn purchase_vector(&self) -> Result<&[f64], ModelError> {
        let vector = self
            .purchase_vector
            .get_or_try_init(|| async {
                let a = self.model.matrix(MatrixName::A).await?;
                Ok::<_, ModelError>(a.col(self.sector.index))
            })
            .await?;
        Ok(vector)
    }

    /// The sector's column of `D` (direct only) or `U`, each entry divided
    /// by the indicator's normalization total (`0` for a zero total).
    pub async fn environmental_profile(&self, direct_only: bool) -> Result<Vec<f64>, ModelError> {
        let name = if direct_only { MatrixName::D } else { MatrixName::U };
        let matrix = self.model.matrix(name).await?;
        Ok(matrix
            .col(self.sector.index)
            .iter()
            .enumerate()
            .map(|(i, &x)| safe_div(x, value_at(&self.normalization_totals, i)))
            .collect())
    }

    /// Splits the sector's total impacts (`U` column) into direct
    /// operations (`D` column) and supply chain (`U - D`).
    pub async fn partition(&self) -> Result<Partition, ModelError> {
        let (d, u) = try_join!(
            self.model.matrix(MatrixName::D),
            self.model.matrix(MatrixName::U)
        )?;
        let direct = d.col(self.sector.index);
        let totals = u.col(self.sector.index);
        let upstream = totals
            .iter()
            .enumerate()
            .map(|(i, t)| t - value_at(&direct, i))
            .collect();
        Ok(Partition {
            totals,
            direct,
            upstream,
        })
    }

    /// Splits the sector's impacts into direct operations, in-region supply
    /// chain and out-of-region supply chain.
    ///
    /// For single-region models all supply chain impacts are reported as
    /// in-region. For multi-regional models `D` is scaled by the scaling
    /// vector and every cell is attributed by the region of its column's
    /// sector; summing `D` columns directly would misplace impacts that
    /// supply chains route across regions.
    pub async fn regionalized_partition(&self) -> Result<RegionalizedPartition, ModelError> {
        if !self.model.is_multi_regional().await? {
            let p = self.partition().await?;
            let out_of_region = zeros(p.upstream.len());
            return Ok(RegionalizedPartition {
                totals: p.totals,
                direct: p.direct,
                upstream_in_region: p.upstream,
                upstream_out_of_region: out_of_region,
            });
        }

        let (d, sectors) = try_join!(self.model.matrix(MatrixName::D), self.model.sectors())?;
        let scaling = self.scaling_vector().await?;
        let g = d.scale_columns(scaling);

        let mut locations: Vec<Option<&str>> = vec![None; g.cols()];
        for s in &sectors {
            if let Some(slot) = locations.get_mut(s.index) {
                *slot = s.location.as_deref();
            }
        }
        let own_location = self.sector.location.as_deref();

        let mut partition = RegionalizedPartition {
            totals: zeros(g.rows()),
            direct: zeros(g.rows()),
            upstream_in_region: zeros(g.rows()),
            upstream_out_of_region: zeros(g.rows()),
        };
        for row in 0..g.rows() {
            for col in 0..g.cols() {
                let value = g.get(row, col);
                if value == 0.0 {
                    continue;
                }
                partition.totals[row] += value;
                if col == self.sector.index {
                    partition.direct[row] += value;
                } else if locations[col] == own_location {
                    partition.upstream_in_region[row] += value;
                } else {
                    partition.upstream_out_of_region[row] += value;
                }
            }
        }
        Ok(partition)
    }

    /// Contributions of the sector's direct purchases: rows of `U` scaled
    /// by the purchase vector.
    ///
    /// With exactly one indicator the raw scaled row is returned (absolute
    /// units, as shown by the profile chart). With several indicators each
    /// row is normalized by its total and the rows are summed (relative
    /// units). This asymmetry is intentional.
    pub async fn purchase_contributions(
        &self,
        indicators: &[Indicator],
    ) -> Result<Vec<f64>, ModelError> {
        let u = self.model.matrix(MatrixName::U).await?;
        let purchases = self.purchase_vector().await?;
        Ok(self.contributions(&u, purchases, indicators))
    }

    /// Contributions of the regions and sectors where impacts originate:
    /// rows of `D` scaled by the scaling vector.
    ///
    /// Same single vs. multiple indicator asymmetry as
    /// [`purchase_contributions`](Self::purchase_contributions).
    pub async fn contributions_of_origins(
        &self,
        indicators: &[Indicator],
    ) -> Result<Vec<f64>, ModelError> {
        let d = self.model.matrix(MatrixName::D).await?;
        let scaling = self.scaling_vector().await?;
        Ok(self.contributions(&d, scaling, indicators))
    }

    fn contributions(&self, matrix: &Matrix, factors: &[f64], indicators: &[Indicator]) -> Vec<f64> {
        if let [indicator] = indicators {
            return factors
                .iter()
                .enumerate()
                .map(|(col, f)| matrix.get(indicator.index, col) * f)
                .collect();
        }

        let nfactors = reciprocals(&self.normalization_totals);
        let mut sum = zeros(factors.len());
        for indicator in indicators {
            let nf = value_at(&nfactors, indicator.index);
            if nf == 0.0 {
                continue;
            }
            for (col, f) in factors.iter().enumerate() {
                sum[col] += matrix.get(indicator.index, col) * f * nf;
            }
        }
        sum
    }
}
