//! JSON Schema validation for the dashboard figure set.
//!
//! The schema is embedded at compile time from
//! `schemas/figure-set.json` and checked with JSON Schema Draft 7.
//! It pins the shape of every chart: four charts, each with `series` and
//! `layout`, finite-or-null `y` values and a known render mode.
//!
//! Equal `x`/`y` length cannot be written in Draft 7, so
//! [`validate_figures`] checks it on top of the schema.
//!
//! # Example
//!
//! ```rust,ignore
//! use gdpdash::{build_figures, validate_figures, DashboardConfig};
//!
//! let figures = build_figures(&records, &DashboardConfig::default());
//! let value = serde_json::to_value(&figures)?;
//! assert!(validate_figures(&value).is_ok());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static FIGURE_SET_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/figure-set.json"))
        .expect("Invalid embedded schema")
});

/// Validate a JSON value against a JSON schema.
///
/// Returns every violation as a readable message.
///
/// ```ignore
/// use serde_json::json;
/// use gdpdash::validation::validate;
///
/// let schema = json!({
///     "type": "object",
///     "required": ["title"],
///     "properties": { "title": { "type": "string" } }
/// });
///
/// assert!(validate(&schema, &json!({ "title": "GDP" })).is_ok());
/// assert!(validate(&schema, &json!({ "xAxisTitle": "Year" })).is_err());
/// ```
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Boolean form of [`validate`].
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// The embedded figure-set schema.
pub fn figure_set_schema() -> &'static Value {
    &FIGURE_SET_SCHEMA
}

/// Validate a serialized figure set (array of four charts).
pub fn validate_figures(data: &Value) -> Result<(), Vec<String>> {
    validate(figure_set_schema(), data)?;

    let errors = series_length_errors(data);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick check against the figure-set schema.
pub fn is_valid_figures(data: &Value) -> bool {
    is_valid(figure_set_schema(), data) && series_length_errors(data).is_empty()
}

/// One message per series whose `x` and `y` differ in length.
fn series_length_errors(data: &Value) -> Vec<String> {
    let Some(charts) = data.as_array() else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    for (c, chart) in charts.iter().enumerate() {
        let series = chart.get("series").and_then(Value::as_array);
        for (s, entry) in series.into_iter().flatten().enumerate() {
            let len = |key: &str| entry.get(key).and_then(Value::as_array).map(Vec::len);
            if let (Some(x), Some(y)) = (len("x"), len("y")) {
                if x != y {
                    errors.push(format!(
                        "x has {} values but y has {} at /{}/series/{}",
                        x, y, c, s
                    ));
                }
            }
        }
    }
    errors
}
