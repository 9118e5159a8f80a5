//! Domain models for the dashboard pipeline.
//!
//! - [`ObservationRecord`] - one (country, year, value) cell of the long table
//! - [`ChartSpec`] - series plus layout for one dashboard chart
//! - [`SeriesSpec`] - x/y arrays with display mode, label and colour
//! - [`LayoutMeta`] - titles and tick spacing
//! - [`AxisValue`] - an x position: a year or a category (country name)
//!
//! Serialized field names are camelCase so the JSON can be fed to the
//! dashboard page as is. Missing numbers serialize as `null`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Observation
// =============================================================================

/// One cell of the cleaned long-format table.
///
/// Uniquely identified by `(country, year)`. `value` is `None` when the source
/// cell was empty or not a finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub country: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl ObservationRecord {
    pub fn new(country: impl Into<String>, year: i32, value: Option<f64>) -> Self {
        Self {
            country: country.into(),
            year,
            value,
        }
    }
}

// =============================================================================
// Chart specification
// =============================================================================

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Line,
    Bar,
}

/// A position on the x axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Year(i32),
    Category(String),
}

impl From<i32> for AxisValue {
    fn from(year: i32) -> Self {
        AxisValue::Year(year)
    }
}

impl From<&str> for AxisValue {
    fn from(name: &str) -> Self {
        AxisValue::Category(name.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(name: String) -> Self {
        AxisValue::Category(name)
    }
}

/// One trace of a chart. `x` and `y` always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    pub x: Vec<AxisValue>,
    pub y: Vec<Option<f64>>,
    pub render_mode: RenderMode,
    pub label: String,
    pub color: Option<String>,
}

impl SeriesSpec {
    /// Build a series from `(x, y)` points.
    pub fn from_points<X, I>(render_mode: RenderMode, label: impl Into<String>, points: I) -> Self
    where
        X: Into<AxisValue>,
        I: IntoIterator<Item = (X, Option<f64>)>,
    {
        let (x, y): (Vec<AxisValue>, Vec<Option<f64>>) = points
            .into_iter()
            .map(|(x, y)| (x.into(), y))
            .unzip();
        Self {
            x,
            y,
            render_mode,
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Titles and axis settings of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMeta {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub x_tick_spacing: Option<u32>,
}

impl LayoutMeta {
    pub fn new(
        title: impl Into<String>,
        x_axis_title: impl Into<String>,
        y_axis_title: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_axis_title: x_axis_title.into(),
            y_axis_title: y_axis_title.into(),
            x_tick_spacing: None,
        }
    }

    pub fn with_tick_spacing(mut self, spacing: u32) -> Self {
        self.x_tick_spacing = Some(spacing);
        self
    }
}

/// A chart: ordered series plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub series: Vec<SeriesSpec>,
    pub layout: LayoutMeta,
}
