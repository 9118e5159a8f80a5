//! Trend chart: the raw indicator, one line per country.

use std::cmp::Ordering;

use super::ChartLabels;
use crate::models::{ChartSpec, LayoutMeta, ObservationRecord, RenderMode, SeriesSpec};
use crate::transform::grouper::{group_by_country, CountrySeries};

/// One line per country, traces ordered by descending value at `rank_year`.
///
/// The rank decides trace (legend) order only. A country without a value at
/// `rank_year` ranks below every country that has one; ties keep the order of
/// first appearance in `records`.
pub fn trend_chart(records: &[ObservationRecord], rank_year: i32, labels: &ChartLabels) -> ChartSpec {
    let series = rank_by_year(group_by_country(records), rank_year)
        .into_iter()
        .map(|CountrySeries { country, points }| SeriesSpec::from_points(RenderMode::Line, country, points))
        .collect();

    ChartSpec {
        series,
        layout: LayoutMeta::new(
            format!(
                "Change in {} in selected countries<br>{}",
                labels.indicator,
                labels.span()
            ),
            "Year",
            labels.indicator.clone(),
        )
        .with_tick_spacing(labels.tick_spacing),
    }
}

/// Stable sort of country series by descending value at `year`; missing last.
pub fn rank_by_year(mut groups: Vec<CountrySeries>, year: i32) -> Vec<CountrySeries> {
    groups.sort_by(|a, b| descending_missing_last(a.value_at(year), b.value_at(year)));
    groups
}

fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::models::AxisValue;

    fn labels() -> ChartLabels {
        ChartLabels::from_config(&DashboardConfig::default())
    }

    fn rec(country: &str, year: i32, value: Option<f64>) -> ObservationRecord {
        ObservationRecord::new(country, year, value)
    }

    #[test]
    fn test_trend_ranked_by_final_year() {
        let records = vec![
            rec("India", 2017, Some(1900.0)),
            rec("India", 2018, Some(2000.0)),
            rec("Japan", 2017, Some(38000.0)),
            rec("Japan", 2018, Some(39000.0)),
            rec("China", 2017, Some(8800.0)),
            rec("China", 2018, Some(9700.0)),
        ];

        let chart = trend_chart(&records, 2018, &labels());
        let order: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(order, vec!["Japan", "China", "India"]);
        assert_eq!(chart.series[0].x, vec![AxisValue::Year(2017), AxisValue::Year(2018)]);
        assert_eq!(chart.series[0].y, vec![Some(38000.0), Some(39000.0)]);
        assert_eq!(chart.series[0].render_mode, RenderMode::Line);
    }

    #[test]
    fn test_missing_final_value_ranks_last_and_stable() {
        let records = vec![
            rec("A", 2018, None),
            rec("B", 2018, Some(1.0)),
            rec("C", 2017, Some(100.0)),
            rec("D", 2018, Some(1.0)),
        ];

        let chart = trend_chart(&records, 2018, &labels());
        let order: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();

        // B and D tie, A and C have no 2018 value: both pairs keep input order.
        assert_eq!(order, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_trend_deterministic() {
        let records = vec![rec("A", 2018, None), rec("B", 2018, None), rec("C", 2018, Some(3.0))];
        let first = trend_chart(&records, 2018, &labels());
        let second = trend_chart(&records, 2018, &labels());
        assert_eq!(first, second);
    }

    #[test]
    fn test_trend_points_sorted_by_year() {
        let records = vec![rec("Brazil", 1991, Some(2.0)), rec("Brazil", 1990, Some(1.0))];
        let chart = trend_chart(&records, 2018, &labels());
        assert_eq!(chart.series[0].x, vec![AxisValue::Year(1990), AxisValue::Year(1991)]);
    }

    #[test]
    fn test_trend_empty() {
        let chart = trend_chart(&[], 2018, &labels());
        assert!(chart.series.is_empty());
        assert_eq!(chart.layout.x_tick_spacing, Some(5));
        assert_eq!(
            chart.layout.title,
            "Change in GDP per capita in selected countries<br>1990 to 2018"
        );
    }
}
