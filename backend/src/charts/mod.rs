//! Chart builders: the four dashboard charts derived from cleaned records.
//!
//! ```text
//!                  ┌──────────┐
//!             ┌──▶ │  trend   │  one line per country, ranked by final-year value
//!             │    └──────────┘
//!             │    ┌──────────┐
//!             ├──▶ │  growth  │  year-over-year growth of one country
//!  records ───┤    └──────────┘
//!             │    ┌──────────┐
//!             ├──▶ │  ratio   │  country A / country B, joined on year
//!             │    └──────────┘
//!             │    ┌──────────┐
//!             └──▶ │ average  │  mean growth per country, as bars
//!                  └──────────┘
//! ```
//!
//! Each builder is a pure function of the records and its own selectors; none
//! depends on another's output.

pub mod average;
pub mod growth;
pub mod ratio;
pub mod stats;
pub mod trend;

pub use average::average_growth_chart;
pub use growth::growth_chart;
pub use ratio::ratio_chart;
pub use trend::{rank_by_year, trend_chart};

use crate::config::DashboardConfig;
use crate::models::{ChartSpec, ObservationRecord};

/// Number of charts on the dashboard.
pub const FIGURE_COUNT: usize = 4;

/// Text shared by the chart titles.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    /// Indicator name, e.g. "GDP per capita".
    pub indicator: String,
    pub first_year: i32,
    pub last_year: i32,
    /// Year tick spacing of the time-axis charts.
    pub tick_spacing: u32,
}

impl ChartLabels {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            indicator: config.indicator.clone(),
            first_year: config.first_year,
            last_year: config.last_year,
            tick_spacing: config.tick_spacing,
        }
    }

    /// "1990 to 2018"
    pub fn span(&self) -> String {
        format!("{} to {}", self.first_year, self.last_year)
    }
}

/// Build the four charts in dashboard order: trend, growth, ratio, average
/// growth.
pub fn build_figures(records: &[ObservationRecord], config: &DashboardConfig) -> Vec<ChartSpec> {
    let labels = ChartLabels::from_config(config);
    vec![
        trend_chart(records, config.last_year, &labels),
        growth_chart(records, &config.growth_country, &labels),
        ratio_chart(records, &config.ratio_numerator, &config.ratio_denominator, &labels),
        average_growth_chart(records, &labels),
    ]
}
