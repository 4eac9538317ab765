//! Result Normalizer - Normalized values and shares of a raw result.

use crate::domain::foundation::numeric::{max_abs, safe_div};
use crate::domain::foundation::{CalculationResult, Indicator, Sector};

/// Normalized and share matrices derived from a raw result.
///
/// # Algorithm
/// - `normalized[i][j] = data[i][j] / totals[i]`, `0` for a zero or
///   missing total
/// - `shares[i][j] = normalized[i][j] / max_j |normalized[i][j]|`, so that
///   every share lies in `[-1, 1]`
///
/// Built once; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultNormalizer {
    result: CalculationResult,
    normalized: Vec<Vec<f64>>,
    shares: Vec<Vec<f64>>,
}

impl ResultNormalizer {
    /// Computes the normalized and share matrices of the given result.
    pub fn new(result: CalculationResult) -> Self {
        let normalized: Vec<Vec<f64>> = result
            .data
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let total = result.totals.get(i).copied().unwrap_or(0.0);
                row.iter().map(|&x| safe_div(x, total)).collect()
            })
            .collect();

        let shares = normalized
            .iter()
            .map(|row| {
                let max = max_abs(row);
                row.iter().map(|&x| Self::share_of(x, max)).collect()
            })
            .collect();

        Self {
            result,
            normalized,
            shares,
        }
    }

    fn share_of(x: f64, max: f64) -> f64 {
        if x == 0.0 || !x.is_finite() || !max.is_finite() {
            return 0.0;
        }
        if max == 0.0 {
            return if x >= 0.0 { 1.0 } else { -1.0 };
        }
        (x / max).clamp(-1.0, 1.0)
    }

    /// The wrapped raw result.
    pub fn raw(&self) -> &CalculationResult {
        &self.result
    }

    /// Raw result value of the indicator and sector, `0` when out of range.
    pub fn result(&self, indicator: &Indicator, sector: &Sector) -> f64 {
        self.result.value(indicator.index, sector.index)
    }

    /// Normalized value of the indicator and sector, `0` when out of range.
    pub fn normalized(&self, indicator: &Indicator, sector: &Sector) -> f64 {
        Self::cell(&self.normalized, indicator.index, sector.index)
    }

    /// Share in `[-1, 1]` of the indicator and sector, `0` when out of range.
    pub fn share(&self, indicator: &Indicator, sector: &Sector) -> f64 {
        Self::cell(&self.shares, indicator.index, sector.index)
    }

    /// The normalized matrix, indicator rows by sector columns.
    pub fn normalized_matrix(&self) -> &[Vec<f64>] {
        &self.normalized
    }

    /// The share matrix, indicator rows by sector columns.
    pub fn share_matrix(&self) -> &[Vec<f64>] {
        &self.shares
    }

    fn cell(data: &[Vec<f64>], row: usize, col: usize) -> f64 {
        data.get(row)
            .and_then(|xs| xs.get(col))
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::IndicatorGroup;
    use proptest::prelude::*;

    fn indicator(index: usize) -> Indicator {
        Indicator::new(format!("I{}", index), "Indicator", "kg", IndicatorGroup::ImpactPotential, index)
    }

    fn sector(index: usize) -> Sector {
        Sector::new(format!("s{}", index), format!("{}", index), "Sector", index)
    }

    fn result(data: Vec<Vec<f64>>, totals: Vec<f64>) -> CalculationResult {
        CalculationResult {
            indicators: (0..data.len()).map(|i| format!("I{}", i)).collect(),
            sectors: data
                .first()
                .map(|r| (0..r.len()).map(|j| format!("s{}", j)).collect())
                .unwrap_or_default(),
            data,
            totals,
        }
    }

    #[test]
    fn single_region_normalization_scenario() {
        let n = ResultNormalizer::new(result(vec![vec![10.0, 20.0, 70.0]], vec![100.0]));

        let expected_normalized = [0.1, 0.2, 0.7];
        let expected_shares = [0.1429, 0.2857, 1.0];
        for j in 0..3 {
            assert!((n.normalized(&indicator(0), &sector(j)) - expected_normalized[j]).abs() < 1e-4);
            assert!((n.share(&indicator(0), &sector(j)) - expected_shares[j]).abs() < 1e-4);
        }
    }

    #[test]
    fn zero_total_yields_zero_normalized_values() {
        let n = ResultNormalizer::new(result(vec![vec![10.0, -5.0]], vec![0.0]));
        for j in 0..2 {
            assert_eq!(n.normalized(&indicator(0), &sector(j)), 0.0);
            assert_eq!(n.share(&indicator(0), &sector(j)), 0.0);
        }
    }

    #[test]
    fn missing_total_yields_zero() {
        let n = ResultNormalizer::new(result(vec![vec![1.0], vec![2.0]], vec![4.0]));
        assert_eq!(n.normalized(&indicator(1), &sector(0)), 0.0);
        assert_eq!(n.normalized(&indicator(0), &sector(0)), 0.25);
    }

    #[test]
    fn negative_values_produce_negative_shares() {
        let n = ResultNormalizer::new(result(vec![vec![-8.0, 4.0]], vec![2.0]));
        assert_eq!(n.share(&indicator(0), &sector(0)), -1.0);
        assert_eq!(n.share(&indicator(0), &sector(1)), 0.5);
    }

    #[test]
    fn result_returns_raw_values() {
        let n = ResultNormalizer::new(result(vec![vec![10.0, 20.0]], vec![100.0]));
        assert_eq!(n.result(&indicator(0), &sector(1)), 20.0);
    }

    #[test]
    fn out_of_range_lookups_are_zero() {
        let n = ResultNormalizer::new(result(vec![vec![10.0, 20.0]], vec![100.0]));
        assert_eq!(n.result(&indicator(3), &sector(0)), 0.0);
        assert_eq!(n.share(&indicator(0), &sector(7)), 0.0);
        assert_eq!(n.normalized(&indicator(5), &sector(5)), 0.0);
    }

    #[test]
    fn share_of_tiny_values_without_max_is_signed_one() {
        assert_eq!(ResultNormalizer::share_of(1e-30, 0.0), 1.0);
        assert_eq!(ResultNormalizer::share_of(-1e-30, 0.0), -1.0);
        assert_eq!(ResultNormalizer::share_of(0.0, 0.0), 0.0);
    }

    #[test]
    fn overflowing_normalization_keeps_shares_bounded() {
        let n = ResultNormalizer::new(result(vec![vec![1e300, 2e300]], vec![1e-10]));
        for j in 0..2 {
            let s = n.share(&indicator(0), &sector(j));
            assert!(!s.is_nan());
            assert!((-1.0..=1.0).contains(&s));
            assert!(n.normalized(&indicator(0), &sector(j)).is_finite());
        }
    }

    #[test]
    fn share_of_non_finite_input_is_zero() {
        assert_eq!(ResultNormalizer::share_of(f64::INFINITY, f64::INFINITY), 0.0);
        assert_eq!(ResultNormalizer::share_of(1.0, f64::INFINITY), 0.0);
        assert_eq!(ResultNormalizer::share_of(f64::NAN, 1.0), 0.0);
    }

    proptest! {
        #[test]
        fn shares_are_bounded(
            rows in prop::collection::vec(prop::collection::vec(prop_oneof![-1e6f64..1e6, -1e300f64..1e300], 1..8), 1..5),
            totals in prop::collection::vec(prop_oneof![Just(0.0f64), -1e4f64..1e4, -1e-10f64..1e-10], 0..6),
        ) {
            let n = ResultNormalizer::new(result(rows, totals));
            for row in n.share_matrix() {
                for &s in row {
                    prop_assert!(s.is_finite());
                    prop_assert!((-1.0..=1.0).contains(&s));
                }
            }
            for row in n.normalized_matrix() {
                for &x in row {
                    prop_assert!(x.is_finite());
                }
            }
        }
    }
}
