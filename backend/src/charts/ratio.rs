//! Ratio chart: one country's indicator divided by another's.

use super::stats::ratio_by_year;
use super::ChartLabels;
use crate::models::{ChartSpec, LayoutMeta, ObservationRecord, RenderMode, SeriesSpec};
use crate::transform::grouper::series_for;

/// Trace colour of the ratio line.
pub const RATIO_COLOR: &str = "Red";

/// `numerator / denominator` for every year both countries have a record.
///
/// The two series are joined on year, never by position. Years where either
/// value is missing, or the denominator is zero, are kept with a `None` ratio;
/// years covered by only one country are left out.
pub fn ratio_chart(
    records: &[ObservationRecord],
    numerator: &str,
    denominator: &str,
    labels: &ChartLabels,
) -> ChartSpec {
    let top = series_for(records, numerator);
    let bottom = series_for(records, denominator);
    let points = ratio_by_year(&top.points, &bottom.points);

    let series = SeriesSpec::from_points(
        RenderMode::Line,
        format!("{} / {}", numerator, denominator),
        points,
    )
    .with_color(RATIO_COLOR);

    ChartSpec {
        series: vec![series],
        layout: LayoutMeta::new(
            format!("{} ratio<br>{} vs. {}", labels.indicator, numerator, denominator),
            "Year",
            "Ratio",
        )
        .with_tick_spacing(labels.tick_spacing),
    }
}
