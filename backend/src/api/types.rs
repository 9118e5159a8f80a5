//! REST API types.
//!
//! Successful responses and errors share one envelope, so a client can
//! always read `status` first:
//!
//! ```json
//! {
//!   "requestId": "…",
//!   "generatedAt": "2026-01-01T00:00:00Z",
//!   "status": "ready",
//!   "figures": [ … ],
//!   "summary": { … },
//!   "csvInfo": { … }
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::plotly::to_plotly_all;
use crate::error::ServerError;
use crate::transform::clean::CleanSummary;
use crate::transform::pipeline::{CsvInfo, DashboardResult};

/// Shape of the `figures` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureFormat {
    /// Neutral chart specs, as validated by the figure-set schema
    #[default]
    Spec,
    /// Plotly.js figures
    Plotly,
}

/// Query string accepted by the figure endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiguresQuery {
    #[serde(default)]
    pub format: FigureFormat,
}

/// Response carrying the four dashboard charts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiguresResponse {
    pub request_id: String,
    pub generated_at: DateTime<Utc>,
    /// "ready" when every roster country was found, "warning" otherwise
    pub status: String,
    pub figures: Vec<Value>,
    pub summary: CleanSummary,
    pub csv_info: CsvInfo,
}

impl FiguresResponse {
    pub fn from_result(result: DashboardResult, format: FigureFormat) -> Result<Self, serde_json::Error> {
        let figures = match format {
            FigureFormat::Spec => result
                .figures
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?,
            FigureFormat::Plotly => to_plotly_all(&result.figures),
        };

        let status = if result.summary.countries_missing.is_empty() {
            "ready"
        } else {
            "warning"
        };

        Ok(Self {
            request_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            status: status.to_string(),
            figures,
            summary: result.summary,
            csv_info: result.csv_info,
        })
    }
}

/// Create an error response body
pub fn error_response(error: &str) -> Value {
    json!({
        "requestId": Uuid::new_v4().to_string(),
        "generatedAt": Utc::now(),
        "status": "error",
        "error": error,
        "figures": [],
    })
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Pipeline(e) if e.is_input_error() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = match &self {
            ServerError::Pipeline(e) => e.to_string(),
            ServerError::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        };
        (self.status_code(), Json(error_response(&message))).into_response()
    }
}
