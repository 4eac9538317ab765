//! EEIO Results - Result analysis for environmentally-extended input-output models
//!
//! This crate turns model data and calculation results of EEIO models (such
//! as USEEIO) into what result views display: region-aggregated heatmaps,
//! normalized shares, sector rankings and per-sector contribution analyses.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
