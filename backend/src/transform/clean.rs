//! Wide-to-long cleaning of the indicator table.
//!
//! ```text
//! Country  Country Code  1989  1990  ...  2018  2019        country  year  value
//! ┌──────┬─────┬──────┬──────┬─────┬──────┬──────┐        ┌───────┬──────┬──────┐
//! │Brazil│ BRA │ 2900 │ 3100 │ ... │ 9000 │ 8700 │   →    │Brazil │ 1990 │ 3100 │
//! │Chad  │ TCD │  ... │  ... │ ... │  ... │  ... │        │Brazil │ ...  │ ...  │
//! └──────┴─────┴──────┴──────┴─────┴──────┴──────┘        │Brazil │ 2018 │ 9000 │
//!                                                         └───────┴──────┴──────┘
//! ```
//!
//! Only roster countries and years inside the configured range survive.
//! Everything here is pure: the same table always yields the same records.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::config::DashboardConfig;
use crate::error::{SchemaError, SchemaResult};
use crate::models::ObservationRecord;
use crate::parser::{normalize_header, RawTable};

/// Label of the country name column.
pub const COUNTRY_COLUMN: &str = "Country";

/// Cell contents read as a missing value.
const MISSING_MARKERS: [&str; 6] = ["", "..", "na", "n/a", "nan", "null"];

/// `1990` or the World Bank export form `1990 [YR1990]`.
static YEAR_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(?:\s*\[YR(\d{4})\])?$").expect("valid year regex"));

/// Reshape a wide table into long-format records.
///
/// Records come out country by country in source row order, years ascending
/// within each country.
///
/// # Errors
/// Any [`SchemaError`]: no `Country` column, a non-metadata column whose label
/// is not a year, a year present twice, or a year of the range without a
/// column.
pub fn clean(raw: &RawTable, config: &DashboardConfig) -> SchemaResult<Vec<ObservationRecord>> {
    let country_idx = raw
        .column_index(COUNTRY_COLUMN)
        .ok_or_else(|| SchemaError::MissingColumn(COUNTRY_COLUMN.to_string()))?;

    let years = year_columns(raw, country_idx, config)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut records = Vec::with_capacity(config.roster.len() * years.len());

    for row in &raw.rows {
        let country = cell(row, country_idx);
        if !config.in_roster(country) || !seen.insert(country) {
            continue;
        }
        for &(idx, year) in &years {
            records.push(ObservationRecord::new(country, year, parse_value(cell(row, idx))));
        }
    }

    Ok(records)
}

/// Parse a year column label. `None` if it is not a year.
pub fn parse_year_label(label: &str) -> Option<i32> {
    let caps = YEAR_LABEL.captures(label.trim())?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    if let Some(tagged) = caps.get(2) {
        if tagged.as_str().parse::<i32>().ok()? != year {
            return None;
        }
    }
    Some(year)
}

/// Parse one data cell. Missing markers and non-finite numbers give `None`.
pub fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m)) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Resolve the in-range year columns as `(column index, year)`, sorted by year.
fn year_columns(
    raw: &RawTable,
    country_idx: usize,
    config: &DashboardConfig,
) -> SchemaResult<Vec<(usize, i32)>> {
    let discarded: Vec<String> = config
        .discard_columns
        .iter()
        .map(|c| normalize_header(c))
        .collect();

    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();

    for (idx, label) in raw.headers.iter().enumerate() {
        if idx == country_idx || label.is_empty() || discarded.contains(label) {
            continue;
        }
        let year =
            parse_year_label(label).ok_or_else(|| SchemaError::InvalidYearColumn(label.clone()))?;
        if let Some(&first) = by_year.get(&year) {
            return Err(SchemaError::DuplicateYearColumn {
                year,
                first: raw.headers[first].clone(),
                second: label.clone(),
            });
        }
        by_year.insert(year, idx);
    }

    if let Some(missing) = (config.first_year..=config.last_year).find(|y| !by_year.contains_key(y)) {
        return Err(SchemaError::MissingYearColumn(missing));
    }

    Ok(by_year
        .into_iter()
        .filter(|(year, _)| config.contains_year(*year))
        .map(|(year, idx)| (idx, year))
        .collect())
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// What the cleaner kept, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanSummary {
    /// Roster countries present, in order of first appearance.
    pub countries_found: Vec<String>,
    /// Roster countries absent from the source, in roster order.
    pub countries_missing: Vec<String>,
    pub record_count: usize,
    /// Records whose value is `None`.
    pub missing_values: usize,
}

/// Summarize cleaned records against the roster.
pub fn summarize(records: &[ObservationRecord], config: &DashboardConfig) -> CleanSummary {
    let mut countries_found: Vec<String> = Vec::new();
    for record in records {
        if !countries_found.contains(&record.country) {
            countries_found.push(record.country.clone());
        }
    }

    let countries_missing = config
        .roster
        .iter()
        .filter(|c| !countries_found.contains(c))
        .cloned()
        .collect();

    CleanSummary {
        countries_found,
        countries_missing,
        record_count: records.len(),
        missing_values: records.iter().filter(|r| r.value.is_none()).count(),
    }
}

/// Write records as a long-format CSV (`country,year,value`).
///
/// Missing values are written as empty cells.
pub fn write_csv<W: std::io::Write>(records: &[ObservationRecord], writer: W) -> std::io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record).map_err(std::io::Error::from)?;
    }
    wtr.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> DashboardConfig {
        DashboardConfig {
            roster: vec!["Brazil".into(), "China".into(), "Japan".into()],
            first_year: 1990,
            last_year: 1992,
            ..DashboardConfig::default()
        }
    }

    fn sample_table() -> RawTable {
        RawTable::from_rows(
            &["Country", "Country Code", "1989", "1990", "1991", "1992", "1993"],
            &[
                &["Brazil", "BRA", "90", "100", "110", "99", "1"],
                &["Chad", "TCD", "1", "2", "3", "4", "5"],
                &["China", "CHN", "20", "25", "", "30", "1"],
            ],
        )
    }

    #[test]
    fn test_wide_to_long() {
        let records = clean(&sample_table(), &small_config()).unwrap();

        assert_eq!(
            records,
            vec![
                ObservationRecord::new("Brazil", 1990, Some(100.0)),
                ObservationRecord::new("Brazil", 1991, Some(110.0)),
                ObservationRecord::new("Brazil", 1992, Some(99.0)),
                ObservationRecord::new("China", 1990, Some(25.0)),
                ObservationRecord::new("China", 1991, None),
                ObservationRecord::new("China", 1992, Some(30.0)),
            ]
        );
    }

    #[test]
    fn test_only_roster_and_range_survive() {
        let config = small_config();
        let records = clean(&sample_table(), &config).unwrap();

        assert!(records.iter().all(|r| config.in_roster(&r.country)));
        assert!(records.iter().all(|r| config.contains_year(r.year)));
        assert!(!records.iter().any(|r| r.country == "Chad"));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let table = sample_table();
        let config = small_config();
        assert_eq!(clean(&table, &config).unwrap(), clean(&table, &config).unwrap());
    }

    #[test]
    fn test_missing_country_column() {
        let table = RawTable::from_rows(&["Name", "1990", "1991", "1992"], &[&["Brazil", "1", "2", "3"]]);
        let err = clean(&table, &small_config()).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumn("Country".into()));
    }

    #[test]
    fn test_non_year_column_is_fatal() {
        let table = RawTable::from_rows(
            &["Country", "Indicator Name", "1990", "1991", "1992"],
            &[&["Brazil", "GDP", "1", "2", "3"]],
        );
        let err = clean(&table, &small_config()).unwrap_err();
        assert_eq!(err, SchemaError::InvalidYearColumn("Indicator Name".into()));
    }

    #[test]
    fn test_extra_metadata_column_can_be_discarded() {
        let table = RawTable::from_rows(
            &["Country", "Indicator Name", "1990", "1991", "1992"],
            &[&["Brazil", "GDP", "1", "2", "3"]],
        );
        let config = DashboardConfig {
            discard_columns: vec!["Indicator Name".into()],
            ..small_config()
        };
        assert_eq!(clean(&table, &config).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_year_column() {
        let table = RawTable::from_rows(&["Country", "1990", "1992"], &[&["Brazil", "1", "3"]]);
        let err = clean(&table, &small_config()).unwrap_err();
        assert_eq!(err, SchemaError::MissingYearColumn(1991));
    }

    #[test]
    fn test_duplicate_year_column() {
        let table = RawTable::from_rows(
            &["Country", "1990", "1991", "1992", "1990 [YR1990]"],
            &[&["Brazil", "1", "2", "3", "4"]],
        );
        let err = clean(&table, &small_config()).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateYearColumn { year: 1990, .. }));
    }

    #[test]
    fn test_blank_trailing_column_ignored() {
        let table = RawTable::from_rows(&["Country", "1990", "1991", "1992", ""], &[&["Brazil", "1", "2", "3", ""]]);
        assert_eq!(clean(&table, &small_config()).unwrap().len(), 3);
    }

    #[test]
    fn test_no_roster_match_is_empty_not_error() {
        let table = RawTable::from_rows(&["Country", "1990", "1991", "1992"], &[&["Chad", "1", "2", "3"]]);
        assert!(clean(&table, &small_config()).unwrap().is_empty());

        let header_only = RawTable::from_rows(&["Country", "1990", "1991", "1992"], &[]);
        assert!(clean(&header_only, &small_config()).unwrap().is_empty());
    }

    #[test]
    fn test_first_duplicate_country_row_wins() {
        let table = RawTable::from_rows(
            &["Country", "1990", "1991", "1992"],
            &[&["Brazil", "1", "2", "3"], &["Brazil", "7", "8", "9"]],
        );
        let records = clean(&table, &small_config()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].value, Some(1.0));
    }

    #[test]
    fn test_parse_year_label() {
        assert_eq!(parse_year_label("1990"), Some(1990));
        assert_eq!(parse_year_label(" 2018 "), Some(2018));
        assert_eq!(parse_year_label("1990 [YR1990]"), Some(1990));
        assert_eq!(parse_year_label("1990 [YR1991]"), None);
        assert_eq!(parse_year_label("Country Code"), None);
        assert_eq!(parse_year_label("90"), None);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("3100.25"), Some(3100.25));
        assert_eq!(parse_value(" 42 "), Some(42.0));
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value(".."), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("n/a"), None);
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn test_summarize() {
        let records = clean(&sample_table(), &small_config()).unwrap();
        let summary = summarize(&records, &small_config());

        assert_eq!(summary.countries_found, vec!["Brazil", "China"]);
        assert_eq!(summary.countries_missing, vec!["Japan"]);
        assert_eq!(summary.record_count, 6);
        assert_eq!(summary.missing_values, 1);
    }

    #[test]
    fn test_write_csv() {
        let records = vec![
            ObservationRecord::new("Brazil", 1990, Some(100.5)),
            ObservationRecord::new("Brazil", 1991, None),
        ];
        let mut out = Vec::new();
        write_csv(&records, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "country,year,value\nBrazil,1990,100.5\nBrazil,1991,\n");
    }
}
