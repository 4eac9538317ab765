//! Application layer - Query handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CalculateHeatmapHandler, CompareSectorProfilesHandler, NormalizationTotalsHandler,
    ResultConfig, SelectIndicatorsHandler, DEFAULT_INDICATORS,
};
