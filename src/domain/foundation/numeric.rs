//! Small numeric helpers shared by the analysis services.

/// Returns a vector of `len` zeros.
pub fn zeros(len: usize) -> Vec<f64> {
    vec![0.0; len]
}

/// Returns a vector of `len` ones.
pub fn ones(len: usize) -> Vec<f64> {
    vec![1.0; len]
}

/// Divides `value` by `total`, resolving to `0` when either side is zero,
/// the total is not finite or the quotient overflows.
pub fn safe_div(value: f64, total: f64) -> f64 {
    if value == 0.0 || total == 0.0 || !total.is_finite() {
        return 0.0;
    }
    let q = value / total;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// Reciprocal factors for scaling by `1 / total`; zero totals stay zero.
pub fn reciprocals(totals: &[f64]) -> Vec<f64> {
    totals
        .iter()
        .map(|&t| if t == 0.0 || !t.is_finite() { 0.0 } else { 1.0 / t })
        .collect()
}

/// Returns the value at `index` or `0` when out of range.
pub fn value_at(xs: &[f64], index: usize) -> f64 {
    xs.get(index).copied().unwrap_or(0.0)
}

/// Maximum absolute value of the slice, `0` for an empty slice.
pub fn max_abs(xs: &[f64]) -> f64 {
    xs.iter().fold(0.0, |max, x| max.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_div_guards_zero_total() {
        assert_eq!(safe_div(5.0, 0.0), 0.0);
        assert_eq!(safe_div(0.0, 2.0), 0.0);
        assert_eq!(safe_div(5.0, f64::NAN), 0.0);
        assert!((safe_div(5.0, 2.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn safe_div_overflow_is_zero() {
        assert_eq!(safe_div(1e300, 1e-10), 0.0);
        assert_eq!(safe_div(-1e300, 1e-10), 0.0);
        assert_eq!(safe_div(f64::NAN, 2.0), 0.0);
    }

    #[test]
    fn reciprocals_keep_zero_totals() {
        assert_eq!(reciprocals(&[2.0, 0.0, 4.0]), vec![0.5, 0.0, 0.25]);
    }

    #[test]
    fn max_abs_of_mixed_signs() {
        assert_eq!(max_abs(&[1.0, -3.0, 2.0]), 3.0);
        assert_eq!(max_abs(&[]), 0.0);
    }

    #[test]
    fn value_at_out_of_range_is_zero() {
        assert_eq!(value_at(&[1.0], 3), 0.0);
    }
}
