//! Dashboard configuration.
//!
//! [`DashboardConfig`] holds the fixed parameters of the analysis: the country
//! roster, the year range, and the countries picked out by the growth and
//! ratio charts. Its `Default` is the GDP per capita dashboard; a JSON file can
//! override any field.
//!
//! [`ServerSettings`] holds what the `serve` command needs from the
//! environment (a `.env` file is honoured).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default location of the wide GDP table.
pub const DEFAULT_DATA_PATH: &str = "data/GDP.csv";

/// The ten largest economies tracked by the dashboard.
pub const DEFAULT_ROSTER: [&str; 10] = [
    "United States",
    "China",
    "Japan",
    "Germany",
    "United Kingdom",
    "India",
    "France",
    "Brazil",
    "Italy",
    "Russian Federation",
];

/// Parameters of the four charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Indicator name used in chart titles.
    pub indicator: String,

    /// Countries kept by the cleaner (exact name match).
    pub roster: Vec<String>,

    /// First year kept (inclusive).
    pub first_year: i32,

    /// Last year kept (inclusive). Also the ranking year of the trend chart.
    pub last_year: i32,

    /// Non-year columns to discard besides `Country`.
    pub discard_columns: Vec<String>,

    /// Country of the growth-rate chart.
    pub growth_country: String,

    /// Numerator country of the ratio chart.
    pub ratio_numerator: String,

    /// Denominator country of the ratio chart.
    pub ratio_denominator: String,

    /// Year tick spacing of the time-axis charts.
    pub tick_spacing: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            indicator: "GDP per capita".to_string(),
            roster: DEFAULT_ROSTER.iter().map(|c| c.to_string()).collect(),
            first_year: 1990,
            last_year: 2018,
            discard_columns: vec!["Country Code".to_string()],
            growth_country: "Brazil".to_string(),
            ratio_numerator: "Brazil".to_string(),
            ratio_denominator: "China".to_string(),
            tick_spacing: 5,
        }
    }
}

impl DashboardConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from JSON text and validate it.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::from_json_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Reject configurations no chart can be built from.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.roster.is_empty() {
            return Err(ConfigError::Invalid("roster is empty".to_string()));
        }
        if self.first_year > self.last_year {
            return Err(ConfigError::Invalid(format!(
                "firstYear {} is after lastYear {}",
                self.first_year, self.last_year
            )));
        }
        if self.tick_spacing == 0 {
            return Err(ConfigError::Invalid("tickSpacing must be positive".to_string()));
        }
        Ok(())
    }

    /// Whether `year` is inside the configured range.
    pub fn contains_year(&self, year: i32) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }

    /// Whether `country` is on the roster.
    pub fn in_roster(&self, country: &str) -> bool {
        self.roster.iter().any(|c| c == country)
    }
}

/// Settings for the HTTP server, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// `GDPDASH_PORT`, default 3000.
    pub port: u16,
    /// `GDPDASH_DATA`, default `data/GDP.csv`.
    pub data_path: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl ServerSettings {
    /// Read settings from the process environment (after loading `.env`).
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(port) = lookup("GDPDASH_PORT") {
            settings.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("GDPDASH_PORT is not a port: '{}'", port)))?;
        }
        if let Some(path) = lookup("GDPDASH_DATA") {
            settings.data_path = PathBuf::from(path);
        }

        Ok(settings)
    }
}
