//! Plotly figure JSON from a [`ChartSpec`].
//!
//! A [`ChartSpec`] is what the pipeline produces and validates;
//! this module only maps it onto the figure shape Plotly.js accepts, so a
//! browser can hand the value straight to `Plotly.newPlot`.

use serde_json::{json, Value};

use crate::models::{AxisValue, ChartSpec, RenderMode, SeriesSpec};

/// Convert one chart into a Plotly figure (`{ data, layout }`).
///
/// With a tick spacing set, ticks are pinned to the earliest year on the
/// chart and repeat every `x_tick_spacing` years.
pub fn to_plotly(chart: &ChartSpec) -> Value {
    let data: Vec<Value> = chart.series.iter().map(trace).collect();

    let mut xaxis = json!({ "title": { "text": chart.layout.x_axis_title } });
    if let Some(dtick) = chart.layout.x_tick_spacing {
        xaxis["autotick"] = json!(false);
        xaxis["dtick"] = json!(dtick);
        if let Some(first) = first_year(chart) {
            xaxis["tick0"] = json!(first);
        }
    }

    json!({
        "data": data,
        "layout": {
            "title": { "text": chart.layout.title },
            "xaxis": xaxis,
            "yaxis": { "title": { "text": chart.layout.y_axis_title } },
        }
    })
}

/// Convert a whole figure set.
pub fn to_plotly_all(charts: &[ChartSpec]) -> Vec<Value> {
    charts.iter().map(to_plotly).collect()
}

fn trace(series: &SeriesSpec) -> Value {
    let mut trace = match series.render_mode {
        RenderMode::Line => json!({ "type": "scatter", "mode": "lines" }),
        RenderMode::Bar => json!({ "type": "bar" }),
    };
    trace["x"] = json!(series.x);
    trace["y"] = json!(series.y);
    trace["name"] = json!(series.label);
    if let Some(color) = &series.color {
        trace["marker"] = json!({ "color": color });
    }
    trace
}

fn first_year(chart: &ChartSpec) -> Option<i32> {
    chart
        .series
        .iter()
        .flat_map(|s| s.x.iter())
        .filter_map(|x| match x {
            AxisValue::Year(year) => Some(*year),
            AxisValue::Category(_) => None,
        })
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LayoutMeta;

    fn layout(tick: Option<u32>) -> LayoutMeta {
        let layout = LayoutMeta::new("GDP per capita ratio<br>China vs. India", "Year", "Ratio");
        match tick {
            Some(t) => layout.with_tick_spacing(t),
            None => layout,
        }
    }

    #[test]
    fn test_line_chart() {
        let series = SeriesSpec::from_points(
            RenderMode::Line,
            "China / India",
            vec![(1991, Some(0.5)), (1990, None)],
        )
        .with_color("Red");
        let chart = ChartSpec {
            series: vec![series],
            layout: layout(Some(4)),
        };

        let fig = to_plotly(&chart);

        assert_eq!(fig["data"][0]["type"], "scatter");
        assert_eq!(fig["data"][0]["mode"], "lines");
        assert_eq!(fig["data"][0]["name"], "China / India");
        assert_eq!(fig["data"][0]["marker"]["color"], "Red");
        assert_eq!(fig["data"][0]["y"][1], Value::Null);
        assert_eq!(fig["layout"]["xaxis"]["dtick"], 4);
        assert_eq!(fig["layout"]["xaxis"]["tick0"], 1990);
        assert_eq!(fig["layout"]["xaxis"]["autotick"], false);
        assert_eq!(fig["layout"]["yaxis"]["title"]["text"], "Ratio");
    }

    #[test]
    fn test_bar_chart() {
        let series = SeriesSpec::from_points(
            RenderMode::Bar,
            "Average growth rate",
            vec![("China", Some(0.08)), ("India", Some(0.05))],
        );
        let chart = ChartSpec {
            series: vec![series],
            layout: layout(None),
        };

        let fig = to_plotly(&chart);

        assert_eq!(fig["data"][0]["type"], "bar");
        assert!(fig["data"][0].get("mode").is_none());
        assert!(fig["data"][0].get("marker").is_none());
        assert_eq!(fig["data"][0]["x"][0], "China");
        assert!(fig["layout"]["xaxis"].get("dtick").is_none());
    }

    #[test]
    fn test_empty_chart() {
        let chart = ChartSpec {
            series: vec![],
            layout: layout(Some(4)),
        };
        let fig = to_plotly(&chart);
        assert_eq!(fig["data"], json!([]));
        assert!(fig["layout"]["xaxis"].get("tick0").is_none());
    }
}
