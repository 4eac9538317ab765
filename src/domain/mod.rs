//! Domain layer containing model data types and result analysis.
//!
//! # Module Organization
//!
//! - `foundation` - Model primitives (sectors, indicators, matrices, demands, results)
//! - `analysis` - Aggregation, normalization, ranking and sector analysis
pub mod analysis;
pub mod foundation;
