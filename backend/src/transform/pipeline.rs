//! High-level pipeline API: wide CSV in, dashboard charts out.
//!
//! Combines every step: parsing, cleaning, chart building and output
//! validation. Each step reports progress through [`crate::api::logs`].
//!
//! # Example
//!
//! ```rust,ignore
//! use gdpdash::{build_dashboard, DashboardConfig, DashboardOptions};
//! use std::path::Path;
//!
//! let result = build_dashboard(
//!     Path::new("data/GDP.csv"),
//!     &DashboardConfig::default(),
//!     &DashboardOptions::default(),
//! )?;
//! assert_eq!(result.figures.len(), 4);
//! ```

use serde::Serialize;
use std::path::Path;

use crate::api::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::charts::build_figures;
use crate::config::DashboardConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{ChartSpec, ObservationRecord};
use crate::parser::{parse_bytes_auto, parse_file_auto, ParseResult};
use crate::transform::clean::{clean, summarize, CleanSummary};
use crate::validation::validate_figures;

/// Options for the pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardOptions {
    /// Skip the output schema check
    pub skip_validation: bool,
}

/// CSV file information
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Cleaned long-format data plus what was learned reading it.
#[derive(Debug, Clone)]
pub struct CleanedData {
    pub records: Vec<ObservationRecord>,
    pub summary: CleanSummary,
    pub csv_info: CsvInfo,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone)]
pub struct DashboardResult {
    /// The four charts, in dashboard order
    pub figures: Vec<ChartSpec>,
    /// Records the charts were built from
    pub records: Vec<ObservationRecord>,
    pub summary: CleanSummary,
    pub csv_info: CsvInfo,
}

/// Read and clean a CSV file.
pub fn load_records(path: &Path, config: &DashboardConfig) -> PipelineResult<CleanedData> {
    log_info(format!("Reading {}", path.display()));
    let parse_result = parse_file_auto(path)?;
    clean_parsed(parse_result, config)
}

/// Read and clean CSV bytes.
pub fn load_records_from_bytes(bytes: &[u8], config: &DashboardConfig) -> PipelineResult<CleanedData> {
    log_info(format!("Reading upload ({} bytes)", bytes.len()));
    let parse_result = parse_bytes_auto(bytes)?;
    clean_parsed(parse_result, config)
}

/// Build the dashboard from a CSV file.
///
/// 1. Parses the CSV with auto-detection
/// 2. Cleans it into long-format records
/// 3. Builds the four charts
/// 4. Validates them against the figure schema
pub fn build_dashboard(
    path: &Path,
    config: &DashboardConfig,
    options: &DashboardOptions,
) -> PipelineResult<DashboardResult> {
    config.validate()?;
    let cleaned = load_records(path, config)?;
    build_from_cleaned(cleaned, config, options)
}

/// Build the dashboard from CSV bytes.
///
/// Same as [`build_dashboard`] but accepts raw bytes instead of a file path.
pub fn build_dashboard_from_bytes(
    bytes: &[u8],
    config: &DashboardConfig,
    options: &DashboardOptions,
) -> PipelineResult<DashboardResult> {
    config.validate()?;
    let cleaned = load_records_from_bytes(bytes, config)?;
    build_from_cleaned(cleaned, config, options)
}

/// Build the charts from already-cleaned data.
pub fn build_from_cleaned(
    cleaned: CleanedData,
    config: &DashboardConfig,
    options: &DashboardOptions,
) -> PipelineResult<DashboardResult> {
    log_info("Building charts...");
    let figures = build_figures(&cleaned.records, config);
    for chart in &figures {
        log_info_indent(
            format!(
                "{} ({} series)",
                chart.layout.title.replace("<br>", " - "),
                chart.series.len()
            ),
            1,
        );
    }
    log_success(format!("Built {} charts", figures.len()));

    if options.skip_validation {
        log_info("(validation skipped)");
    } else {
        log_info("Validating chart output...");
        let value = serde_json::to_value(&figures)?;
        if let Err(errors) = validate_figures(&value) {
            for err in errors.iter().take(3) {
                log_error(err.clone());
            }
            return Err(PipelineError::Validation(errors));
        }
        log_success("Chart output valid");
    }

    Ok(DashboardResult {
        figures,
        records: cleaned.records,
        summary: cleaned.summary,
        csv_info: cleaned.csv_info,
    })
}

/// Internal: clean parsed CSV data and report what was kept
fn clean_parsed(parse_result: ParseResult, config: &DashboardConfig) -> PipelineResult<CleanedData> {
    log_success(format!("Detected encoding: {}", parse_result.encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(parse_result.delimiter)));
    log_success(format!(
        "Read {} rows x {} columns",
        parse_result.table.len(),
        parse_result.table.headers.len()
    ));

    let csv_info = CsvInfo {
        encoding: parse_result.encoding,
        delimiter: parse_result.delimiter,
        headers: parse_result.table.headers.clone(),
        row_count: parse_result.table.len(),
    };

    log_info(format!(
        "Cleaning: {} roster countries, years {} to {}",
        config.roster.len(),
        config.first_year,
        config.last_year
    ));
    let records = clean(&parse_result.table, config).map_err(|e| {
        log_error(e.to_string());
        e
    })?;

    let summary = summarize(&records, config);
    print_summary(&summary);

    Ok(CleanedData {
        records,
        summary,
        csv_info,
    })
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

fn print_summary(summary: &CleanSummary) {
    log_success(format!(
        "{} records for {} countries",
        summary.record_count,
        summary.countries_found.len()
    ));
    if summary.countries_found.is_empty() {
        log_warning("No roster country found in the input");
    } else if !summary.countries_missing.is_empty() {
        log_warning(format!(
            "Not in the input: {}",
            summary.countries_missing.join(", ")
        ));
    }
    if summary.missing_values > 0 {
        log_warning(format!("{} missing values", summary.missing_values));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_with_years(rows: &[(&str, &[&str])]) -> String {
        let mut csv = String::from("Country,Country Code");
        for year in 1990..=2019 {
            csv.push_str(&format!(",{}", year));
        }
        csv.push('\n');
        for (country, values) in rows {
            csv.push_str(&format!("\"{}\",XXX", country));
            for i in 0..30 {
                csv.push(',');
                csv.push_str(values.get(i).copied().unwrap_or(""));
            }
            csv.push('\n');
        }
        csv
    }

    #[test]
    fn test_default_options() {
        let opts = DashboardOptions::default();
        assert!(!opts.skip_validation);
    }

    #[test]
    fn test_build_from_bytes() {
        let csv = csv_with_years(&[
            ("Brazil", &["100", "110", "99"]),
            ("China", &["50", "55"]),
            ("Chad", &["1", "2"]),
        ]);

        let result = build_dashboard_from_bytes(
            csv.as_bytes(),
            &DashboardConfig::default(),
            &DashboardOptions::default(),
        )
        .unwrap();

        assert_eq!(result.figures.len(), 4);
        assert_eq!(result.summary.countries_found, vec!["Brazil", "China"]);
        assert_eq!(result.summary.countries_missing.len(), 8);
        assert_eq!(result.records.len(), 2 * 29);
        assert_eq!(result.csv_info.delimiter, ',');
        assert_eq!(result.csv_info.row_count, 3);
    }

    #[test]
    fn test_schema_error_surfaces() {
        let csv = "Country,1990\nBrazil,1\n";
        let err = build_dashboard_from_bytes(
            csv.as_bytes(),
            &DashboardConfig::default(),
            &DashboardOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::Schema(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DashboardConfig {
            roster: vec![],
            ..DashboardConfig::default()
        };
        let err = build_dashboard_from_bytes(b"Country\n", &config, &DashboardOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_format_delimiter() {
        assert_eq!(format_delimiter('\t'), "TAB");
        assert_eq!(format_delimiter(';'), ";");
    }
}
