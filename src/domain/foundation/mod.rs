//! Foundation module - Shared domain primitives.
//!
//! Contains the value types that form the vocabulary of an input-output
//! model: sectors, indicators, matrices, demand vectors and calculation
//! results.

mod calculation;
mod demand;
mod errors;
mod indicator;
mod matrix;
pub mod numeric;
mod sector;

pub use calculation::{CalculationResult, CalculationSetup, Perspective};
pub use demand::{DemandEntry, DemandInfo, DemandSpec, DemandType};
pub use errors::ValidationError;
pub use indicator::{Indicator, IndicatorGroup};
pub use matrix::{Matrix, MatrixName};
pub use sector::{has_multiple_regions, Sector, SingleRegionSectors};
