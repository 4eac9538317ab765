//! Integration tests for result views over an in-memory model.
//!
//! These tests verify the flow from model data to what views display:
//! 1. Handlers compute (or wrap) a result for the configured perspective
//! 2. Multi-regional results are aggregated by sector code
//! 3. Rankings, shares and sector analyses are derived from the result

use std::sync::Arc;

use proptest::prelude::*;

use eeio_results::adapters::InMemoryModel;
use eeio_results::application::{
    CalculateHeatmapHandler, NormalizationTotalsHandler, ResultConfig, SelectIndicatorsHandler,
};
use eeio_results::domain::analysis::{RegionAggregator, SectorAnalysis};
use eeio_results::domain::foundation::{
    CalculationResult, DemandEntry, DemandInfo, DemandType, Indicator, IndicatorGroup, Matrix,
    MatrixName, Perspective, Sector, SingleRegionSectors,
};
use eeio_results::ports::ModelReader;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn ghg() -> Indicator {
    Indicator::new("GHG", "Greenhouse Gases", "kg CO2 eq", IndicatorGroup::ImpactPotential, 0)
}

fn watr() -> Indicator {
    Indicator::new("WATR", "Water Use", "m3", IndicatorGroup::ResourceUse, 1)
}

/// Two regions (A, B) with the sector codes 111 and 222 each.
fn two_region_model() -> InMemoryModel {
    InMemoryModel::new()
        .with_sectors(vec![
            Sector::new("111/a", "111", "Oilseed farming", 0).with_location("A"),
            Sector::new("222/a", "222", "Cement manufacturing", 1).with_location("A"),
            Sector::new("111/b", "111", "Oilseed farming", 2).with_location("B"),
            Sector::new("222/b", "222", "Cement manufacturing", 3).with_location("B"),
        ])
        .with_indicators(vec![ghg(), watr()])
        .with_matrix(
            MatrixName::D,
            Matrix::from_rows(vec![vec![5.0, 1.0, 7.0, 2.0], vec![3.0, 0.5, 1.0, 0.5]]).unwrap(),
        )
        .with_matrix(
            MatrixName::U,
            Matrix::from_rows(vec![vec![6.0, 2.0, 8.0, 3.0], vec![4.0, 1.0, 2.0, 1.0]]).unwrap(),
        )
        .with_matrix(
            MatrixName::L,
            Matrix::from_rows(vec![
                vec![1.1, 0.0, 0.2, 0.0],
                vec![0.1, 1.0, 0.0, 0.1],
                vec![0.3, 0.0, 1.2, 0.0],
                vec![0.0, 0.2, 0.1, 1.0],
            ])
            .unwrap(),
        )
        .with_demand(
            DemandInfo {
                id: "2020_consumption".into(),
                year: 2020,
                demand_type: DemandType::Consumption,
                system: "Complete".into(),
                location: "A".into(),
            },
            vec![
                DemandEntry::new("111/a", 10.0),
                DemandEntry::new("222/a", 5.0),
                DemandEntry::new("111/b", 2.0),
            ],
        )
}

fn names(sectors: &[Sector]) -> Vec<&str> {
    sectors.iter().map(|s| s.name.as_str()).collect()
}

// =============================================================================
// Heatmap Tests
// =============================================================================

#[tokio::test]
async fn multi_regional_matrix_is_aggregated_by_sector_code() {
    let model: Arc<dyn ModelReader> = Arc::new(two_region_model());
    let heatmap = CalculateHeatmapHandler::new(Arc::clone(&model))
        .handle(&ResultConfig::default())
        .await
        .unwrap();

    let sectors = heatmap.sectors().to_vec();
    assert_eq!(sectors.len(), 2);
    assert_eq!(sectors[0].code, "111");
    assert!(sectors[0].location.is_none());
    assert_eq!(heatmap.result(&ghg(), &sectors[0]), 12.0);
    assert_eq!(heatmap.result(&ghg(), &sectors[1]), 3.0);
    assert_eq!(heatmap.share(&ghg(), &sectors[0]), 1.0);
    assert_eq!(heatmap.share(&ghg(), &sectors[1]), 0.25);
}

#[tokio::test]
async fn calculated_result_conserves_regional_sums() {
    let model: Arc<dyn ModelReader> = Arc::new(two_region_model());
    let config = ResultConfig::default()
        .with_perspective(Perspective::Final)
        .with_analysis(DemandType::Consumption);
    let heatmap = CalculateHeatmapHandler::new(Arc::clone(&model))
        .handle(&config)
        .await
        .unwrap();

    // U * diag(d) with d = [10, 5, 2, 0]
    let raw = heatmap.raw();
    assert_eq!(raw.data[0], vec![76.0, 10.0]);
    assert_eq!(raw.data[1], vec![44.0, 5.0]);
    assert_eq!(raw.totals, vec![86.0, 49.0]);
}

#[tokio::test]
async fn ranking_with_search_and_sort_indicator() {
    let model: Arc<dyn ModelReader> = Arc::new(two_region_model());
    let indicators = SelectIndicatorsHandler::new(Arc::clone(&model))
        .handle(&["GHG".to_string(), "WATR".to_string()])
        .await
        .unwrap();
    let heatmap = CalculateHeatmapHandler::new(Arc::clone(&model))
        .handle(&ResultConfig::default())
        .await
        .unwrap();

    let top = heatmap.get_ranking(&indicators, 1, None, None);
    assert_eq!(names(&top), vec!["Oilseed farming"]);

    let searched = heatmap.get_ranking(&indicators, 1, Some("cement"), None);
    assert_eq!(names(&searched), vec!["Cement manufacturing"]);

    let by_water = heatmap.get_ranking(&indicators, -1, None, Some(&watr()));
    assert_eq!(names(&by_water), vec!["Oilseed farming", "Cement manufacturing"]);
}

// =============================================================================
// Sector Analysis Tests
// =============================================================================

#[tokio::test]
async fn regionalized_partition_is_additive() {
    let model: Arc<dyn ModelReader> = Arc::new(two_region_model());
    let totals = NormalizationTotalsHandler::new(Arc::clone(&model))
        .handle(&ResultConfig::default())
        .await
        .unwrap();
    let sector = model.sectors().await.unwrap().remove(0);
    let analysis = SectorAnalysis::new(sector, Arc::clone(&model), totals);

    let p = analysis.regionalized_partition().await.unwrap();
    for i in 0..p.totals.len() {
        let sum = p.direct[i] + p.upstream_in_region[i] + p.upstream_out_of_region[i];
        assert!((sum - p.totals[i]).abs() < 1e-9);
    }
    assert!(p.upstream_out_of_region[0] > 0.0);

    let p = analysis.partition().await.unwrap();
    for i in 0..p.totals.len() {
        assert!((p.direct[i] + p.upstream[i] - p.totals[i]).abs() < 1e-9);
    }
}

#[tokio::test]
async fn single_region_model_has_no_out_of_region_upstream() {
    let model: Arc<dyn ModelReader> = Arc::new(
        InMemoryModel::new()
            .with_sectors(vec![
                Sector::new("a", "111", "Farms", 0).with_location("US"),
                Sector::new("b", "222", "Mining", 1).with_location("US"),
            ])
            .with_indicators(vec![ghg()])
            .with_matrix(MatrixName::D, Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap())
            .with_matrix(MatrixName::U, Matrix::from_rows(vec![vec![3.0, 2.5]]).unwrap()),
    );
    let sector = model.sectors().await.unwrap().remove(1);
    let analysis = SectorAnalysis::new(sector, Arc::clone(&model), vec![10.0]);

    let p = analysis.regionalized_partition().await.unwrap();
    assert_eq!(p.upstream_out_of_region, vec![0.0; p.upstream_in_region.len()]);
    assert_eq!(p.upstream_in_region, vec![0.5]);
}

// =============================================================================
// Properties
// =============================================================================

fn regional_sectors(codes: usize) -> Vec<Sector> {
    let mut sectors = Vec::new();
    for (r, region) in ["A", "B"].iter().enumerate() {
        for c in 0..codes {
            sectors.push(
                Sector::new(format!("{}/{}", c, region), c.to_string(), format!("S{}", c), r * codes + c)
                    .with_location(*region),
            );
        }
    }
    sectors
}

proptest! {
    #[test]
    fn aggregation_conserves_indicator_sums(
        codes in 1usize..6,
        values in prop::collection::vec(-1e6f64..1e6, 12)
    ) {
        let sectors = regional_sectors(codes);
        let row: Vec<f64> = values.iter().copied().take(sectors.len()).collect();
        let result = CalculationResult {
            indicators: vec!["GHG".into()],
            sectors: sectors.iter().map(|s| s.id.clone()).collect(),
            data: vec![row.clone()],
            totals: vec![1.0],
        };
        let view = SingleRegionSectors::from_sectors(&sectors);
        let aggregated = RegionAggregator::aggregate(&result, &sectors, &view);

        prop_assert_eq!(aggregated.data[0].len(), codes);
        let before: f64 = row.iter().sum();
        let after: f64 = aggregated.data[0].iter().sum();
        prop_assert!((before - after).abs() <= 1e-6 * (1.0 + before.abs()));
    }
}
