//! Analysis Module - Services deriving presentation data from model results.
//!
//! # Components
//!
//! - `RegionAggregator` - Collapses multi-regional results by sector code
//! - `ResultNormalizer` - Normalized values and per-indicator shares
//! - `SectorRanker` - Ranking, search and paging over sectors
//! - `HeatmapResult` - The above combined for list and heatmap views
//! - `SectorAnalysis` - Direct/supply chain partitioning of one sector
//! - `sector_profiles` - Profile comparison across sector codes
//!
//! Aggregation, normalization and ranking are pure; only the services that
//! need model data take a [`ModelReader`](crate::ports::ModelReader).

mod heatmap_result;
pub mod paging;
mod region_aggregator;
mod result_normalizer;
mod sector_analysis;
mod sector_profiles;
mod sector_ranker;

pub use heatmap_result::HeatmapResult;
pub use region_aggregator::RegionAggregator;
pub use result_normalizer::ResultNormalizer;
pub use sector_analysis::{Partition, RegionalizedPartition, SectorAnalysis};
pub use sector_profiles::{make_relative, sector_profiles, SectorProfile};
pub use sector_ranker::{compare_names, matches_search, RankedSector, RankingQuery, SectorRanker};
