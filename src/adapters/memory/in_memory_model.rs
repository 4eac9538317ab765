//! In-memory model for offline use and testing.
//!
//! Holds sectors, indicators, matrices and demand vectors in memory and
//! computes calculation results locally.
//!
//! # Example
//!
//! ```ignore
//! let model = InMemoryModel::new()
//!     .with_sectors(sectors)
//!     .with_indicators(indicators)
//!     .with_matrix(MatrixName::D, d)
//!     .with_matrix(MatrixName::U, u);
//!
//! let heatmap = HeatmapResult::from_model(&model, result).await?;
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{
    CalculationResult, CalculationSetup, DemandEntry, DemandInfo, Indicator, Matrix, MatrixName,
    Perspective, Sector,
};
use crate::ports::{ModelError, ModelReader};

/// Model whose data lives in memory.
///
/// Records every matrix request so tests can verify caching behavior of
/// the analysis services.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModel {
    sectors: Vec<Sector>,
    indicators: Vec<Indicator>,
    matrices: HashMap<MatrixName, Arc<Matrix>>,
    demands: Vec<(DemandInfo, Vec<DemandEntry>)>,
    matrix_requests: Arc<Mutex<Vec<MatrixName>>>,
}

impl InMemoryModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sectors.
    pub fn with_sectors(mut self, sectors: Vec<Sector>) -> Self {
        self.sectors = sectors;
        self
    }

    /// Sets the indicators.
    pub fn with_indicators(mut self, indicators: Vec<Indicator>) -> Self {
        self.indicators = indicators;
        self
    }

    /// Adds or replaces a matrix.
    pub fn with_matrix(mut self, name: MatrixName, matrix: Matrix) -> Self {
        self.matrices.insert(name, Arc::new(matrix));
        self
    }

    /// Adds a demand vector.
    pub fn with_demand(mut self, info: DemandInfo, entries: Vec<DemandEntry>) -> Self {
        self.demands.push((info, entries));
        self
    }

    /// Number of requests made for the given matrix.
    pub fn matrix_request_count(&self, name: MatrixName) -> usize {
        self.matrix_requests
            .lock()
            .map(|requests| requests.iter().filter(|n| **n == name).count())
            .unwrap_or(0)
    }

    fn stored_matrix(&self, name: MatrixName) -> Result<Arc<Matrix>, ModelError> {
        self.matrices
            .get(&name)
            .cloned()
            .ok_or_else(|| ModelError::not_found(format!("matrix {}", name)))
    }

    /// Resolves demand entries to a vector over the sector index.
    fn demand_vector(&self, entries: &[DemandEntry]) -> Vec<f64> {
        let mut d = vec![0.0; self.sectors.len()];
        for entry in entries {
            if let Some(sector) = self.sectors.iter().find(|s| s.id == entry.sector) {
                if let Some(slot) = d.get_mut(sector.index) {
                    *slot += entry.amount;
                }
            }
        }
        d
    }
}

#[async_trait]
impl ModelReader for InMemoryModel {
    async fn sectors(&self) -> Result<Vec<Sector>, ModelError> {
        Ok(self.sectors.clone())
    }

    async fn indicators(&self) -> Result<Vec<Indicator>, ModelError> {
        Ok(self.indicators.clone())
    }

    async fn matrix(&self, name: MatrixName) -> Result<Arc<Matrix>, ModelError> {
        if let Ok(mut requests) = self.matrix_requests.lock() {
            requests.push(name);
        }
        self.stored_matrix(name)
    }

    async fn demands(&self) -> Result<Vec<DemandInfo>, ModelError> {
        Ok(self.demands.iter().map(|(info, _)| info.clone()).collect())
    }

    async fn demand(&self, id: &str) -> Result<Vec<DemandEntry>, ModelError> {
        self.demands
            .iter()
            .find(|(info, _)| info.id == id)
            .map(|(_, entries)| entries.clone())
            .ok_or_else(|| ModelError::not_found(format!("demand {}", id)))
    }

    async fn calculate(&self, setup: &CalculationSetup) -> Result<CalculationResult, ModelError> {
        let d = self.demand_vector(&setup.demand);
        let u = self.stored_matrix(MatrixName::U)?;

        let data = match setup.perspective {
            Perspective::Final => u.scale_columns(&d),
            Perspective::Direct | Perspective::Intermediate => {
                let l = self.stored_matrix(MatrixName::L)?;
                let s = l.multiply_vector(&d);
                if setup.perspective == Perspective::Direct {
                    self.stored_matrix(MatrixName::D)?.scale_columns(&s)
                } else {
                    u.scale_columns(&s)
                }
            }
        };

        Ok(CalculationResult {
            indicators: self.indicators.iter().map(|i| i.code.clone()).collect(),
            sectors: self.sectors.iter().map(|s| s.id.clone()).collect(),
            data: data.to_rows(),
            totals: u.multiply_vector(&d),
        })
    }
}
