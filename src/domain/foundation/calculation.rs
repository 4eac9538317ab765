//! Calculation setups and results.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DemandEntry, ValidationError};

/// The perspective of a calculation result.
///
/// `Direct` attributes impacts to the sectors where they occur (the
/// "supply chain" view); `Final` attributes them to the sectors of final
/// demand (the "point of consumption" view); `Intermediate` scales total
/// impacts by the full output requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    #[default]
    Direct,
    Intermediate,
    Final,
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Perspective::Direct => "direct",
            Perspective::Intermediate => "intermediate",
            Perspective::Final => "final",
        };
        f.write_str(s)
    }
}

/// Input of a model calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSetup {
    pub perspective: Perspective,
    pub demand: Vec<DemandEntry>,
}

impl CalculationSetup {
    pub fn new(perspective: Perspective, demand: Vec<DemandEntry>) -> Self {
        Self {
            perspective,
            demand,
        }
    }
}

/// A raw indicator-by-sector result.
///
/// `data[i][j]` is the value of indicator row `i` for sector column `j`;
/// `totals[i]` is the normalization denominator of indicator `i`.
/// Expected shape: `data.len() == indicators.len()` and every row has
/// `sectors.len()` entries. Results received from a model are checked with
/// [`CalculationResult::check_shape`]; lookups stay bounds-checked.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    pub indicators: Vec<String>,
    pub sectors: Vec<String>,
    pub data: Vec<Vec<f64>>,
    pub totals: Vec<f64>,
}

impl CalculationResult {
    /// Returns the raw value at `(indicator_row, sector_col)` or `0`.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.data
            .get(row)
            .and_then(|xs| xs.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    /// Fails when the data rows do not match the indicator and sector lists.
    pub fn check_shape(&self) -> Result<(), ValidationError> {
        if self.data.len() != self.indicators.len() {
            return Err(ValidationError::dimension_mismatch(
                "data",
                self.indicators.len(),
                self.data.len(),
            ));
        }
        if let Some(row) = self.data.iter().find(|row| row.len() != self.sectors.len()) {
            return Err(ValidationError::dimension_mismatch(
                "data row",
                self.sectors.len(),
                row.len(),
            ));
        }
        Ok(())
    }

    /// Sum of all values of the given indicator row.
    pub fn row_sum(&self, row: usize) -> f64 {
        self.data.get(row).map(|xs| xs.iter().sum()).unwrap_or(0.0)
    }
}
