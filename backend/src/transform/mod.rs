//! Transformation module.
//!
//! - Clean: wide table to long-format records
//! - Grouper: long records to one series per country
//! - Pipeline: parse, clean, chart, validate

pub mod clean;
pub mod grouper;
pub mod pipeline;

pub use clean::{clean, summarize, write_csv, CleanSummary};
pub use grouper::{group_by_country, series_for, CountrySeries};
pub use pipeline::*;
