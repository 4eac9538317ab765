//! Dense numeric matrix as served by the model API.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Names of the matrices a model exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixName {
    /// Direct requirements (technical coefficients).
    A,
    /// Satellite coefficients (flows per unit output).
    B,
    /// Characterization factors.
    C,
    /// Direct impacts per unit output.
    D,
    /// Leontief inverse.
    L,
    /// Total flow requirements per unit of final demand.
    M,
    /// Total impacts per unit of final demand.
    N,
    /// Total (direct + upstream) impacts per unit output.
    U,
}

impl MatrixName {
    /// Returns the name as used in API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatrixName::A => "A",
            MatrixName::B => "B",
            MatrixName::C => "C",
            MatrixName::D => "D",
            MatrixName::L => "L",
            MatrixName::M => "M",
            MatrixName::N => "N",
            MatrixName::U => "U",
        }
    }
}

impl fmt::Display for MatrixName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dense, row-major matrix of `f64` values.
///
/// All lookups are bounds-checked: out-of-range cells read as `0` and
/// out-of-range rows or columns as zero vectors, so a missing data point
/// degrades to a neutral value instead of a panic. Scaling operations
/// return new matrices; a `Matrix` is never mutated after construction
/// by the analysis services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows x cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a matrix from rows of equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(ValidationError::dimension_mismatch(
                    format!("matrix row {}", i),
                    cols,
                    row.len(),
                ));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the value at `(row, col)` or `0` when out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.rows || col >= self.cols {
            return 0.0;
        }
        self.data[row * self.cols + col]
    }

    /// Sets the value at `(row, col)`; out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
        }
    }

    /// Returns a copy of the given row (zeros when out of range).
    pub fn row(&self, row: usize) -> Vec<f64> {
        if row >= self.rows {
            return vec![0.0; self.cols];
        }
        let start = row * self.cols;
        self.data[start..start + self.cols].to_vec()
    }

    /// Returns a copy of the given column (zeros when out of range).
    pub fn col(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|row| self.get(row, col)).collect()
    }

    /// Returns a new matrix with each row `i` multiplied by `factors[i]`.
    /// Rows without a factor are zeroed.
    pub fn scale_rows(&self, factors: &[f64]) -> Matrix {
        let mut scaled = self.clone();
        for row in 0..self.rows {
            let f = factors.get(row).copied().unwrap_or(0.0);
            for col in 0..self.cols {
                scaled.data[row * self.cols + col] *= f;
            }
        }
        scaled
    }

    /// Returns a new matrix with each column `j` multiplied by `factors[j]`.
    /// Columns without a factor are zeroed.
    pub fn scale_columns(&self, factors: &[f64]) -> Matrix {
        let mut scaled = self.clone();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let f = factors.get(col).copied().unwrap_or(0.0);
                scaled.data[row * self.cols + col] *= f;
            }
        }
        scaled
    }

    /// Matrix-vector product `M * v`; missing vector entries count as zero.
    pub fn multiply_vector(&self, v: &[f64]) -> Vec<f64> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.get(row, col) * v.get(col).copied().unwrap_or(0.0))
                    .sum()
            })
            .collect()
    }

    /// Returns the matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|row| self.row(row)).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}
