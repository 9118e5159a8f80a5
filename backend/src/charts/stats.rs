//! Null-propagating arithmetic shared by the charts.
//!
//! Every helper returns `None` instead of NaN or infinity, so nothing
//! undefined ever reaches a chart.

use std::collections::BTreeMap;

/// `Some(v)` for finite `v`, otherwise `None`.
pub fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// `a / b`, or `None` when either side is missing or `b` is zero.
pub fn safe_ratio(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    let (a, b) = (a?, b?);
    if b == 0.0 {
        return None;
    }
    finite(a / b)
}

/// Percent change from `previous` to `current` as a fraction (0.10 = +10%).
pub fn pct_change(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    let (previous, current) = (previous?, current?);
    safe_ratio(Some(current - previous), Some(previous))
}

/// Period-over-period growth of a series already ordered by year.
///
/// The first entry has no predecessor and is always `None`. The output has the
/// same length as the input.
///
/// ```ignore
/// let g = growth_rates(&[Some(100.0), Some(110.0), Some(99.0)]);
/// // [None, Some(0.10), Some(-0.10)]
/// ```
pub fn growth_rates(values: &[Option<f64>]) -> Vec<Option<f64>> {
    if values.is_empty() {
        return Vec::new();
    }
    std::iter::once(None)
        .chain(values.windows(2).map(|w| pct_change(w[0], w[1])))
        .collect()
}

/// Join two yearly series on year and divide them.
///
/// Only years present on both sides are kept, ascending. A year where either
/// value is missing, or the denominator is zero, maps to `None`.
pub fn ratio_by_year(
    numerator: &[(i32, Option<f64>)],
    denominator: &[(i32, Option<f64>)],
) -> Vec<(i32, Option<f64>)> {
    let denominator: BTreeMap<i32, Option<f64>> = denominator.iter().copied().collect();
    let numerator: BTreeMap<i32, Option<f64>> = numerator.iter().copied().collect();

    numerator
        .into_iter()
        .filter_map(|(year, a)| denominator.get(&year).map(|&b| (year, safe_ratio(a, b))))
        .collect()
}

/// Arithmetic mean of the defined values, `None` if there are none.
pub fn mean_defined(values: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = values.iter().flatten().copied().collect();
    if defined.is_empty() {
        return None;
    }
    finite(defined.iter().sum::<f64>() / defined.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_close(actual: Option<f64>, expected: f64) {
        let v = actual.expect("expected a value");
        assert!((v - expected).abs() < EPS, "{v} != {expected}");
    }

    #[test]
    fn test_growth_rates() {
        let g = growth_rates(&[Some(100.0), Some(110.0), Some(99.0)]);
        assert_eq!(g.len(), 3);
        assert_eq!(g[0], None);
        assert_close(g[1], 0.10);
        assert_close(g[2], -0.10);
    }

    #[test]
    fn test_growth_rates_nulls_and_zero() {
        let g = growth_rates(&[Some(0.0), Some(5.0), None, Some(6.0)]);
        assert_eq!(g, vec![None, None, None, None]);
    }

    #[test]
    fn test_growth_rates_empty_and_single() {
        assert!(growth_rates(&[]).is_empty());
        assert_eq!(growth_rates(&[Some(1.0)]), vec![None]);
    }

    #[test]
    fn test_ratio_joins_on_year() {
        let a = vec![(2000, Some(50.0)), (2001, Some(60.0))];
        let b = vec![(2000, Some(25.0)), (2001, None)];

        assert_eq!(ratio_by_year(&a, &b), vec![(2000, Some(2.0)), (2001, None)]);
    }

    #[test]
    fn test_ratio_not_positional() {
        // Different coverage: positional zip would pair 2000 with 2001.
        let a = vec![(2000, Some(10.0)), (2001, Some(20.0)), (2002, Some(30.0))];
        let b = vec![(2001, Some(4.0)), (2002, Some(0.0)), (2003, Some(1.0))];

        assert_eq!(ratio_by_year(&a, &b), vec![(2001, Some(5.0)), (2002, None)]);
    }

    #[test]
    fn test_mean_defined() {
        assert_close(mean_defined(&[None, Some(0.1), Some(0.1)]), 0.1);
        assert_close(mean_defined(&[Some(1.0), None, Some(2.0)]), 1.5);
        assert_eq!(mean_defined(&[None, None]), None);
        assert_eq!(mean_defined(&[]), None);
    }

    #[test]
    fn test_non_finite_is_none() {
        assert_eq!(finite(f64::NAN), None);
        assert_eq!(finite(f64::INFINITY), None);
        assert_eq!(safe_ratio(Some(f64::MAX), Some(f64::MIN_POSITIVE)), None);
        assert_eq!(safe_ratio(Some(1.0), Some(0.0)), None);
        assert_eq!(safe_ratio(None, Some(1.0)), None);
    }
}
