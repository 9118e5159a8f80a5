//! # gdpdash - GDP per capita dashboard
//!
//! Reads a wide country-by-year GDP per capita table, reshapes it into
//! long-format observations for a fixed roster of countries, and derives
//! the four dashboard charts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Wide CSV   │────▶│   Parser    │────▶│   Cleaner   │────▶│   Charts    │
//! │ country×yr  │     │  (auto-enc) │     │ (wide→long) │     │ (4 specs)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
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
//! for chart in &result.figures {
//!     println!("{}", chart.layout.title);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Observation records and chart specifications
//! - [`config`] - Dashboard and server configuration
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Cleaning, grouping and the pipeline
//! - [`charts`] - The four chart derivations
//! - [`validation`] - Figure-set schema validation
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Charts
pub mod charts;

// Validation
pub mod validation;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    ConfigResult,
    CsvError,
    PipelineError,
    PipelineResult,
    SchemaError,
    SchemaResult,
    ServerError,
    ServerResult,
};

// =============================================================================
// Re-exports - Models and configuration
// =============================================================================

pub use models::{AxisValue, ChartSpec, LayoutMeta, ObservationRecord, RenderMode, SeriesSpec};

pub use config::{DashboardConfig, ServerSettings};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    parse_bytes_auto,
    parse_file_auto,
    parse_str,
    ParseResult,
    RawTable,
};

// =============================================================================
// Re-exports - Cleaning and grouping
// =============================================================================

pub use transform::{clean, group_by_country, series_for, summarize, write_csv, CleanSummary, CountrySeries};

// =============================================================================
// Re-exports - Charts
// =============================================================================

pub use charts::{
    average_growth_chart,
    build_figures,
    growth_chart,
    rank_by_year,
    ratio_chart,
    trend_chart,
    ChartLabels,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, is_valid_figures, validate, validate_figures};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    build_dashboard,
    build_dashboard_from_bytes,
    build_from_cleaned,
    load_records,
    load_records_from_bytes,
    CleanedData,
    CsvInfo,
    DashboardOptions,
    DashboardResult,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, FigureFormat, FiguresQuery, FiguresResponse};
pub use api::plotly::{to_plotly, to_plotly_all};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server, AppState};
}
