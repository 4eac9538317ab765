//! Result view handlers.
//!
//! Query handlers that combine model access with the analysis services to
//! produce what result views display.

mod calculate_heatmap;
mod compare_sector_profiles;
mod normalization_totals;
mod result_config;
mod select_indicators;

pub use calculate_heatmap::CalculateHeatmapHandler;
pub use compare_sector_profiles::CompareSectorProfilesHandler;
pub use normalization_totals::NormalizationTotalsHandler;
pub use result_config::ResultConfig;
pub use select_indicators::{SelectIndicatorsHandler, DEFAULT_INDICATORS};
