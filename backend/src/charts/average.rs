//! Average growth chart: mean yearly growth per country, as bars.

use super::stats::{growth_rates, mean_defined};
use super::ChartLabels;
use crate::models::{ChartSpec, LayoutMeta, ObservationRecord, RenderMode, SeriesSpec};
use crate::transform::grouper::group_by_country;

/// Bar colour of the average growth chart.
pub const AVERAGE_COLOR: &str = "Gold";

/// One bar per country: the mean of its defined year-over-year growth rates.
///
/// Bars follow the order in which countries first appear in `records`; they
/// are not re-sorted. A country with no defined growth gets a `None` bar.
pub fn average_growth_chart(records: &[ObservationRecord], labels: &ChartLabels) -> ChartSpec {
    let bars = group_by_country(records).into_iter().map(|group| {
        let average = mean_defined(&growth_rates(&group.values()));
        (group.country, average)
    });

    let series = SeriesSpec::from_points(RenderMode::Bar, "Average growth rate", bars)
        .with_color(AVERAGE_COLOR);

    ChartSpec {
        series: vec![series],
        layout: LayoutMeta::new(
            format!("Average {} Growth Rate<br>{}", labels.indicator, labels.span()),
            "Country",
            "Average Growth Rate",
        ),
    }
}
