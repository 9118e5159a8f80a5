//! Growth chart: year-over-year growth rate of a single country.

use super::stats::growth_rates;
use super::ChartLabels;
use crate::models::{ChartSpec, LayoutMeta, ObservationRecord, RenderMode, SeriesSpec};
use crate::transform::grouper::series_for;

/// Growth rate of `country`, one point per year it has a record.
///
/// The first year has no growth (`None`); so does any year whose own or
/// previous value is missing, or whose previous value is zero. A country with
/// no records gives an empty series.
pub fn growth_chart(records: &[ObservationRecord], country: &str, labels: &ChartLabels) -> ChartSpec {
    let series = series_for(records, country);
    let growth = growth_rates(&series.values());
    let points = series.years().into_iter().zip(growth);

    ChartSpec {
        series: vec![SeriesSpec::from_points(RenderMode::Line, country, points)],
        layout: LayoutMeta::new(
            format!("{} growth rate<br>{}", labels.indicator, country),
            "Year",
            "Growth rate",
        )
        .with_tick_spacing(labels.tick_spacing),
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

    #[test]
    fn test_growth_chart() {
        let records = vec![
            ObservationRecord::new("Brazil", 1990, Some(100.0)),
            ObservationRecord::new("China", 1990, Some(5.0)),
            ObservationRecord::new("Brazil", 1991, Some(110.0)),
            ObservationRecord::new("Brazil", 1992, Some(99.0)),
        ];

        let chart = growth_chart(&records, "Brazil", &labels());
        let series = &chart.series[0];

        assert_eq!(chart.series.len(), 1);
        assert_eq!(
            series.x,
            vec![AxisValue::Year(1990), AxisValue::Year(1991), AxisValue::Year(1992)]
        );
        assert_eq!(series.y[0], None);
        assert!((series.y[1].unwrap() - 0.10).abs() < 1e-12);
        assert!((series.y[2].unwrap() + 0.10).abs() < 1e-12);
        assert_eq!(series.label, "Brazil");
        assert_eq!(chart.layout.title, "GDP per capita growth rate<br>Brazil");
    }

    #[test]
    fn test_growth_missing_country_gives_empty_series() {
        let records = vec![ObservationRecord::new("China", 1990, Some(5.0))];
        let chart = growth_chart(&records, "Brazil", &labels());

        assert_eq!(chart.series.len(), 1);
        assert!(chart.series[0].is_empty());
        assert!(chart.series[0].y.is_empty());
    }

    #[test]
    fn test_growth_null_prior_is_null() {
        let records = vec![
            ObservationRecord::new("Brazil", 1990, None),
            ObservationRecord::new("Brazil", 1991, Some(110.0)),
            ObservationRecord::new("Brazil", 1992, Some(0.0)),
            ObservationRecord::new("Brazil", 1993, Some(5.0)),
        ];
        let chart = growth_chart(&records, "Brazil", &labels());
        assert_eq!(chart.series[0].y[..2], [None, None]);
        assert_eq!(chart.series[0].y[3], None);
    }
}
