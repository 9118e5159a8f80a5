//! Group long-format records into one series per country.
//!
//! ```text
//! Long records                     →  Country series
//! ┌────────────────────────────┐      ┌──────────────────────────────┐
//! │ Brazil 1991 110            │      │ Brazil: 1990 100, 1991 110   │
//! │ China  1990  25            │  →   ├──────────────────────────────┤
//! │ Brazil 1990 100            │      │ China:  1990 25              │
//! └────────────────────────────┘      └──────────────────────────────┘
//! ```
//!
//! Countries keep the order in which they first appear in the input; points
//! inside a country are sorted by year.

use std::collections::HashMap;

use crate::models::ObservationRecord;

/// All observations of one country, ordered by year.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<(i32, Option<f64>)>,
}

impl CountrySeries {
    /// Years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|(year, _)| *year).collect()
    }

    /// Values, in year order.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|(_, value)| *value).collect()
    }

    /// Value at `year`, `None` if the year is absent or its value is missing.
    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points
            .iter()
            .find(|(y, _)| *y == year)
            .and_then(|(_, value)| *value)
    }
}

/// Group records by country.
pub fn group_by_country(records: &[ObservationRecord]) -> Vec<CountrySeries> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<SeriesBuilder> = Vec::new();

    for record in records {
        let slot = *index.entry(record.country.as_str()).or_insert_with(|| {
            groups.push(SeriesBuilder::new(&record.country));
            groups.len() - 1
        });
        groups[slot].add(record);
    }

    groups.into_iter().map(SeriesBuilder::build).collect()
}

/// Records of a single country, ordered by year.
pub fn series_for(records: &[ObservationRecord], country: &str) -> CountrySeries {
    let mut builder = SeriesBuilder::new(country);
    for record in records.iter().filter(|r| r.country == country) {
        builder.add(record);
    }
    builder.build()
}

/// Accumulates one country's points while grouping.
struct SeriesBuilder {
    country: String,
    points: Vec<(i32, Option<f64>)>,
}

impl SeriesBuilder {
    fn new(country: &str) -> Self {
        Self {
            country: country.to_string(),
            points: Vec::new(),
        }
    }

    fn add(&mut self, record: &ObservationRecord) {
        self.points.push((record.year, record.value));
    }

    fn build(mut self) -> CountrySeries {
        // Stable, so a repeated year keeps input order.
        self.points.sort_by_key(|(year, _)| *year);
        CountrySeries {
            country: self.country,
            points: self.points,
        }
    }
}
