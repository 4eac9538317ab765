//! Application handlers.
//!
//! Query handlers that orchestrate domain operations.

pub mod results;

pub use results::{
    CalculateHeatmapHandler, CompareSectorProfilesHandler, NormalizationTotalsHandler,
    ResultConfig, SelectIndicatorsHandler, DEFAULT_INDICATORS,
};
